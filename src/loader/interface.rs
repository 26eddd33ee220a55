use crate::error::Result;
use std::path::PathBuf;

/// Trait for loading templates from different sources.
pub trait TemplateLoader {
    /// Makes the template available locally.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - Path to the template root
    fn load(&self) -> Result<PathBuf>;
}
