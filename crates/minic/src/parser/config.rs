/// Configuration for the parser driver.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Recoverable-error cap; scanning stops once it is reached.
    pub max_errors: usize,

    /// Report a missing end-of-input token. One is synthesized either way so
    /// the driver always sees a well-defined final symbol.
    pub require_eof: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_errors: 50,
            require_eof: true,
        }
    }
}
