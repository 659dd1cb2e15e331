//! Shared plumbing for registry commands

use miette::Result;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, FilterCriteria, Session};

/// Filter flags shared by every registry query
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Keep hardware supporting any of these techniques (e.g. "Neutron Diffraction")
    #[arg(long = "technique", short = 't', value_delimiter = ',')]
    pub techniques: Vec<String>,

    /// Keep hardware compatible with any of these instruments (e.g. POLARIS)
    #[arg(long = "instrument", short = 'i', value_delimiter = ',')]
    pub instruments: Vec<String>,

    /// Only hardware with a CAD model (digital twin ready)
    #[arg(long)]
    pub digital_twin: bool,

    /// Only hardware rated to at least 100°C
    #[arg(long)]
    pub high_temp: bool,

    /// Only hardware with pressure control
    #[arg(long)]
    pub pressure_control: bool,
}

impl FilterArgs {
    pub fn to_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            techniques: self.techniques.iter().map(|t| t.trim().to_string()).collect(),
            instruments: self.instruments.iter().map(|i| i.trim().to_string()).collect(),
            digital_twin_only: self.digital_twin,
            high_temp_only: self.high_temp,
            pressure_control: self.pressure_control,
        }
    }
}

/// Resolved configuration plus the loaded session
pub struct Context {
    pub config: Config,
    pub session: Session,
}

impl Context {
    /// Load configuration and open the registry; a missing registry is fatal
    pub fn open(global: &GlobalOpts) -> Result<Self> {
        let config = Config::load();
        let path = global
            .registry
            .clone()
            .unwrap_or_else(|| config.registry_path());
        let session = Session::open(path)?.with_export_file(config.export_file());
        Ok(Self { config, session })
    }

    /// Output format after applying the configured default
    pub fn format(&self, global: &GlobalOpts, fallback: OutputFormat) -> OutputFormat {
        global
            .format
            .resolve(self.config.default_format.as_deref(), fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_args_are_empty() {
        assert!(FilterArgs::default().to_criteria().is_empty());
    }

    #[test]
    fn test_filter_args_to_criteria() {
        let args = FilterArgs {
            techniques: vec!["XRD".into(), " SANS".into(), "XRD".into()],
            instruments: vec!["POLARIS".into()],
            digital_twin: true,
            high_temp: false,
            pressure_control: true,
        };
        let criteria = args.to_criteria();
        assert_eq!(criteria.techniques.len(), 2);
        assert!(criteria.techniques.contains("SANS"));
        assert!(criteria.instruments.contains("POLARIS"));
        assert!(criteria.digital_twin_only);
        assert!(!criteria.high_temp_only);
        assert!(criteria.pressure_control);
    }
}
