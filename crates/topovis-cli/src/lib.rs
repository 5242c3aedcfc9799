//! CLI logic for the topovis network diagram tool.
//!
//! Every network of every input trace document is rendered into its own SVG
//! file. A network that fails is reported and skipped; the remaining networks
//! are still rendered.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    collections::BTreeSet,
    fs,
    io::{self, Read as _},
    path::{Path, PathBuf},
};

use log::{error, info, warn};

use topovis::{
    Diagram, DiagramBuilder, Metadata, TopoError, config::AppConfig, icon::IconLibrary,
    layout::LayoutEngine,
};

use error_adapter::render_reports;

const STDIN_NAME: &str = "<stdin>";

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct Summary {
    outputs: Vec<PathBuf>,
    failed: usize,
}

impl Summary {
    /// Number of SVG files written.
    pub fn rendered(&self) -> usize {
        self.outputs.len()
    }

    /// Number of documents or networks that could not be rendered.
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Paths of the SVG files written, in rendering order.
    pub fn outputs(&self) -> &[PathBuf] {
        &self.outputs
    }

    fn fail(&mut self, context: &str, err: &TopoError) {
        error!(context; "Failed to render");
        for report in render_reports(err) {
            error!("{report}");
        }
        self.failed += 1;
    }
}

/// Run the topovis CLI application
///
/// Reads every input trace document (or standard input when none are given)
/// and writes one SVG per network into the output directory.
///
/// # Errors
///
/// Returns `TopoError` only for failures that stop the whole batch:
/// configuration errors, an unreadable standard input, or an output
/// directory that cannot be created. Failures of single documents or
/// networks are counted in the returned [`Summary`].
pub fn run(args: &Args) -> Result<Summary, TopoError> {
    let mut config = config::load_config(args.config.as_ref())?;
    if let Some(engine) = args.layout {
        config.layout_mut().set_engine(engine);
    }

    fs::create_dir_all(&args.output_dir)?;
    let metadata = args.metadata.clone().unwrap_or_default();
    let mut summary = Summary::default();

    if args.inputs.is_empty() {
        info!("Reading trace document from standard input");
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        render_document(STDIN_NAME, &source, &config, &metadata, &args.output_dir, &mut summary);
    }

    for input in &args.inputs {
        let name = input.display().to_string();
        info!(input_path = name; "Processing trace document");

        match fs::read_to_string(input) {
            Ok(source) => {
                render_document(&name, &source, &config, &metadata, &args.output_dir, &mut summary)
            }
            Err(err) => summary.fail(&name, &err.into()),
        }
    }

    info!(rendered = summary.rendered(), failed = summary.failed(); "Batch finished");
    Ok(summary)
}

fn render_document(
    input: &str,
    source: &str,
    config: &AppConfig,
    metadata: &Metadata,
    output_dir: &Path,
    summary: &mut Summary,
) {
    let builder = DiagramBuilder::new(config.clone());

    let topologies = match builder.parse_trace(source) {
        Ok(topologies) => topologies,
        Err(err) => return summary.fail(input, &err),
    };
    if topologies.is_empty() {
        warn!(input; "Trace document holds no networks");
    }

    let mut diagrams = Vec::new();
    for topology in topologies {
        let name = topology.name().to_string();
        match builder.diagram(topology) {
            Ok(diagram) => diagrams.push((name, diagram.with_metadata(metadata.clone()))),
            Err(err) => summary.fail(&name, &err),
        }
    }

    let library = load_icons(config, diagrams.iter().map(|(_, diagram)| diagram));
    let builder = builder.with_icons(library);

    for (name, diagram) in &diagrams {
        let path = output_path(output_dir, name, summary.outputs());
        match render_network(&builder, diagram).and_then(|svg| fs::write(&path, svg).map_err(TopoError::from)) {
            Ok(()) => {
                info!(network = name.as_str(), output_file = path.display().to_string(); "SVG exported successfully");
                summary.outputs.push(path);
            }
            Err(err) => summary.fail(name, &err),
        }
    }
}

/// Renders with the configured engine, retrying a failed block layout with
/// the layered one when the configuration allows it.
fn render_network(builder: &DiagramBuilder, diagram: &Diagram) -> Result<String, TopoError> {
    let layout = builder.config().layout();

    match builder.render_svg(diagram) {
        Err(TopoError::Layout(message))
            if layout.fallback_to_layered() && layout.engine() != LayoutEngine::Layered =>
        {
            warn!(
                network = diagram.title(),
                engine = layout.engine().to_string(),
                reason = message;
                "Layout failed, falling back to layered layout"
            );
            builder.render_svg_with(diagram, LayoutEngine::Layered)
        }
        result => result,
    }
}

/// Reads the asset of every icon the diagrams use from the icon root.
///
/// A missing, unreadable or malformed asset is only logged; the renderer
/// draws a placeholder in its place.
fn load_icons<'a>(config: &AppConfig, diagrams: impl Iterator<Item = &'a Diagram>) -> IconLibrary {
    let icons = config.icons();

    let mut references = BTreeSet::from([icons.default_icon().to_string()]);
    for diagram in diagrams {
        references.extend(diagram.decorations().icons().values().cloned());
    }

    let mut library = IconLibrary::new();
    for reference in references {
        let path = icons.root().join(&reference);
        match fs::read_to_string(&path) {
            Ok(source) => {
                if let Err(err) = library.insert(reference.as_str(), &source) {
                    warn!(icon = err.reference(), err:err; "Icon asset is malformed, using placeholder");
                }
            }
            Err(err) => {
                warn!(
                    icon = reference,
                    path = path.display().to_string(),
                    err:err;
                    "Icon asset not loaded, using placeholder"
                );
            }
        }
    }

    library
}

/// Returns `<output_dir>/<stem>.svg` for a network, adding a numeric suffix
/// when an earlier network of the batch already took that file.
fn output_path(output_dir: &Path, name: &str, taken: &[PathBuf]) -> PathBuf {
    let stem = file_stem(name);
    let mut path = output_dir.join(format!("{stem}.svg"));

    let mut suffix = 2;
    while taken.contains(&path) {
        path = output_dir.join(format!("{stem}-{suffix}.svg"));
        suffix += 1;
    }

    if suffix > 2 {
        warn!(
            network = name,
            output_file = path.display().to_string();
            "Output file name already used in this batch, writing to a suffixed file"
        );
    }
    path
}

/// Turns a network name into a safe file name.
fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let stem = stem.trim().trim_start_matches('.');
    if stem.is_empty() {
        "network".to_string()
    } else {
        stem.to_string()
    }
}
