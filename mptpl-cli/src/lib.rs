use anyhow::{Context, Result};
use clap::ValueEnum;
use mptpl_codegen::{
    Asset, ComponentOptions, Dialect, EmitFile, LazyElement, LazyElementTable, RootNode,
    TemplateCodegenOptions, tag_set,
};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Target {
    Weixin,
    Qq,
    Alipay,
    Baidu,
    Toutiao,
    Kuaishou,
}

impl Target {
    pub fn dialect(self) -> Dialect {
        match self {
            Target::Weixin => Dialect::Weixin,
            Target::Qq => Dialect::Qq,
            Target::Alipay => Dialect::Alipay,
            Target::Baidu => Dialect::Baidu,
            Target::Toutiao => Dialect::Toutiao,
            Target::Kuaishou => Dialect::Kuaishou,
        }
    }

    /// Template file extension of the target platform.
    pub fn extension(self) -> &'static str {
        match self {
            Target::Weixin => "wxml",
            Target::Qq => "qml",
            Target::Alipay => "axml",
            Target::Baidu => "swan",
            Target::Toutiao => "ttml",
            Target::Kuaishou => "ksml",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentConfig {
    pub get_property_sync: Option<bool>,
    pub merge_virtual_host_attributes: Option<bool>,
    pub v_show: Option<String>,
}

impl ComponentConfig {
    /// Overrides only the fields present in the config file.
    fn merge_into(self, mut component: ComponentOptions) -> ComponentOptions {
        if let Some(sync) = self.get_property_sync {
            component.get_property_sync = sync;
        }
        if let Some(merge) = self.merge_virtual_host_attributes {
            component.merge_virtual_host_attributes = merge;
        }
        if let Some(v_show) = self.v_show {
            component.v_show = Some(v_show);
        }
        component
    }
}

/// Per-project overrides on top of the target preset, read from JSON.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildConfig {
    pub directive: Option<String>,
    pub scope_id: Option<String>,
    pub slot_fallback: Option<bool>,
    pub builtin_components: Vec<String>,
    pub mini_program_components: Vec<String>,
    pub lazy_element: Option<LazyElementTable>,
    pub component: Option<ComponentConfig>,
}

impl BuildConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let txt = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&txt).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn apply(self, mut opts: TemplateCodegenOptions) -> TemplateCodegenOptions {
        if let Some(directive) = self.directive {
            opts = opts.with_directive(directive);
        }
        if let Some(scope_id) = self.scope_id {
            opts = opts.with_scope_id(scope_id);
        }
        if let Some(fallback) = self.slot_fallback {
            opts = opts.with_slot_fallback(fallback);
        }
        if let Some(table) = self.lazy_element {
            opts = opts.with_lazy_element(Some(LazyElement::Table(table)));
        }
        if let Some(c) = self.component {
            let preset = opts.component.take().unwrap_or_default();
            opts = opts.with_component(Some(c.merge_into(preset)));
        }
        opts.with_builtin_components(tag_set(self.builtin_components))
            .with_mini_program_components(tag_set(self.mini_program_components))
    }
}

/// Writes assets below `out_dir`, creating parent directories as needed.
pub struct DirEmitter {
    out_dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirEmitter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            written: Vec::new(),
        }
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl EmitFile for DirEmitter {
    fn emit_file(&mut self, asset: Asset) -> io::Result<()> {
        let path = self.out_dir.join(&asset.file_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| with_path(e, "create", parent))?;
        }
        fs::write(&path, asset.source).map_err(|e| with_path(e, "write", &path))?;
        tracing::debug!(path = %path.display(), "asset written");
        self.written.push(path);
        Ok(())
    }
}

fn with_path(err: io::Error, action: &str, path: &Path) -> io::Error {
    io::Error::new(err.kind(), format!("failed to {action} {}: {err}", path.display()))
}

/// Compile a JSON template AST into `<out_dir>/<stem>.<ext>`.
pub fn build_cmd(
    input: &Path,
    out_dir: Option<&Path>,
    target: Target,
    config: Option<&Path>,
) -> Result<PathBuf> {
    let src =
        fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))?;
    let root: RootNode = serde_json::from_str(&src)
        .with_context(|| format!("invalid template AST in {}", input.display()))?;

    let name = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("component");
    let file_name = format!("{}.{}", name, target.extension());

    let config = match config {
        Some(path) => BuildConfig::load(path)?,
        None => BuildConfig::default(),
    };
    let opts = config.apply(TemplateCodegenOptions::new(target.dialect(), file_name));

    let out_dir = out_dir
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("target/mptpl-gen"));
    let mut emitter = DirEmitter::new(&out_dir);
    mptpl_codegen::generate(root, &opts, &mut emitter)
        .with_context(|| format!("failed to compile {}", input.display()))?;

    let out_path = emitter
        .written()
        .first()
        .cloned()
        .with_context(|| format!("nothing emitted for {}", input.display()))?;
    println!("Generated: {}", out_path.display());
    Ok(out_path)
}
