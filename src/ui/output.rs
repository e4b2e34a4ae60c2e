//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Announce each check and prefix its result with the check name.
    Verbose,
    /// Show every check result.
    #[default]
    Normal,
    /// Show only checks that did not pass.
    Quiet,
    /// Show nothing except errors.
    Silent,
}

impl OutputMode {
    /// Whether passing checks are listed.
    pub fn shows_passing(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Whether any status output is shown.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Silent)
    }
}
