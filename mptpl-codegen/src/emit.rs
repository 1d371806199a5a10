use std::io;

/// One compiled template, keyed by the file it should be written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub file_name: String,
    pub source: String,
}

/// Receives compiled markup. Writing to disk or into a bundle happens behind this seam.
pub trait EmitFile {
    fn emit_file(&mut self, asset: Asset) -> io::Result<()>;
}

// Collecting emitter, handy for build pipelines that post-process in memory.
impl EmitFile for Vec<Asset> {
    fn emit_file(&mut self, asset: Asset) -> io::Result<()> {
        self.push(asset);
        Ok(())
    }
}
