/// Presentation settings for the command line shell.
///
/// Nothing in here reaches the discovery core; the collection window and the
/// probe filter are fixed inside `nvtscout-core`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    /// Print the discovered records as a JSON array instead of a table.
    pub json: bool,
    /// Skips the banner and section headers.
    pub no_banner: bool,
}
