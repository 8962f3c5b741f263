use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the gas box.
///
/// Zero-distance collision pairs are not an error: the resolver skips them locally.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration value. Raised before a run starts.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// `step()` was called after every configured step already ran.
    #[error("simulation already finished after {steps} steps")]
    Finished { steps: usize },

    /// The interactive viewer failed to start or crashed.
    #[error("viewer error: {0}")]
    Gui(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_names_the_field() {
        let e = Error::Config("dt must be finite and > 0".to_string());
        let msg = e.to_string();
        assert!(msg.contains("invalid configuration"));
        assert!(msg.contains("dt"));
    }

    #[test]
    fn viewer_error_is_plain_text() {
        // the viewer maps its own errors in; the core has no GUI types
        let msg = Error::Gui("no display".to_string()).to_string();
        assert_eq!(msg, "viewer error: no display");
    }

    #[test]
    fn finished_error_reports_step_count() {
        let msg = Error::Finished { steps: 42 }.to_string();
        assert!(msg.contains("42"));
    }
}
