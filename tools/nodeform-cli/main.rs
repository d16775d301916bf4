use clap::{Parser, Subcommand};
use nodeform::prelude::*;
use nodeform::workflow::{BindingStatus, check_binding, export_workflow_with_indent};
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Inspect workflows and preview forms built on top of them
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Optional path to a JSON builder config
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that a file is a valid workflow in API format
    Validate {
        /// Path to the workflow JSON file
        workflow_path: String,
    },
    /// List the nodes of a workflow and the inputs a form can bind to
    Inputs {
        /// Path to the workflow JSON file
        workflow_path: String,
        /// Only show this node
        #[arg(short, long)]
        node: Option<String>,
    },
    /// Re-export a workflow as pretty-printed JSON
    Export {
        /// Path to the workflow JSON file
        workflow_path: String,
        /// Output path (defaults to the configured export file name)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Render a saved form and check its bindings
    Preview {
        /// Path to a saved form JSON file
        form_path: String,
        /// Workflow to check the form's bindings against
        #[arg(short, long)]
        workflow: Option<String>,
    },
    /// List the available component types and their editable properties
    Palette,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => BuilderConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => BuilderConfig::default(),
    };

    match cli.command {
        Command::Validate { workflow_path } => run_validate(&workflow_path),
        Command::Inputs {
            workflow_path,
            node,
        } => run_inputs(&workflow_path, node.as_deref()),
        Command::Export {
            workflow_path,
            output,
        } => run_export(&workflow_path, output, &config),
        Command::Preview {
            form_path,
            workflow,
        } => run_preview(&form_path, workflow.as_deref()),
        Command::Palette => run_palette(),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to create log filter: {}", e)));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
    {
        exit_with_error(&format!("Failed to initialize tracing: {}", e));
    }
}

fn load_workflow(path: &str) -> WorkflowDocument {
    let raw = fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read workflow file '{}': {}", path, e))
    });
    parse_and_validate(&raw).unwrap_or_else(|e| exit_with_error(&e.to_string()))
}

fn run_validate(workflow_path: &str) {
    let start = Instant::now();
    let document = load_workflow(workflow_path);
    let duration = start.elapsed();

    let edges: usize = document
        .nodes()
        .map(|(_, node)| node.inputs.iter().filter(|(_, v)| v.is_reference()).count())
        .sum();

    println!("Workflow is valid.");
    println!("  -> Nodes:            {}", document.len());
    println!("  -> Node references:  {}", edges);
    println!("  -> Parsed in:        {:?}", duration);
}

fn run_inputs(workflow_path: &str, only_node: Option<&str>) {
    let document = load_workflow(workflow_path);

    if let Some(id) = only_node {
        if document.get(id).is_none() {
            exit_with_error(&format!("Node '{}' not found in workflow", id));
        }
    }

    for (id, node) in document.nodes() {
        if only_node.is_some_and(|only| only != id.as_str()) {
            continue;
        }
        println!("{}", node_label(id, node));
        let bindable = list_bindable_inputs(node);
        if bindable.is_empty() {
            println!("    (no bindable inputs)");
        }
        for name in bindable {
            let value = node
                .inputs
                .get(name)
                .map(|v| v.to_string())
                .unwrap_or_default();
            println!("    {}: {}", name, value);
        }
    }
}

fn run_export(workflow_path: &str, output: Option<String>, config: &BuilderConfig) {
    let document = load_workflow(workflow_path);
    let contents = export_workflow_with_indent(&document, config.export_indent)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let output = output.unwrap_or_else(|| config.export_filename.clone());

    fs::write(&output, contents).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to write '{}': {}", output, e))
    });
    println!("Exported {} nodes to '{}'", document.len(), output);
}

fn run_preview(form_path: &str, workflow_path: Option<&str>) {
    let form = SavedForm::from_file(form_path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to load form from '{}': {}", form_path, e))
    });

    println!("--- {} ({} components) ---", form.name, form.components.len());
    println!("{}", FormPreview::new().render_text(&form.components));

    let Some(workflow_path) = workflow_path else {
        return;
    };
    let document = load_workflow(workflow_path);

    println!("\n--- Bindings ---");
    for component in &form.components {
        let status = match check_binding(&document, component) {
            BindingStatus::Unbound => "unbound".to_string(),
            BindingStatus::NodeOnly { node } => format!("node '{}' selected, no input", node.title()),
            BindingStatus::Bound { node, input, value } => {
                format!("{}.{} (currently {})", node.title(), input, value)
            }
            BindingStatus::MissingNode(id) => format!("node '{}' is not in the workflow", id),
            BindingStatus::MissingInput { node, input } => {
                format!("'{}' has no input '{}'", node.title(), input)
            }
            BindingStatus::NotBindable { node, input } => {
                format!("'{}.{}' is a node connection", node.title(), input)
            }
        };
        println!("  {}: {}", component.label, status);
    }
}

fn run_palette() {
    for kind in ComponentKind::ALL {
        let spec = kind.spec();
        println!("{} ({})", spec.palette_label(), kind);
        let defaults = spec.default_props().to_value().unwrap_or_default();
        for editor in spec.editors() {
            let current = defaults.get(editor.key).map(|v| editor.display(v));
            println!(
                "    {:<14} {:<30} default: {}",
                editor.key,
                editor.label,
                current.unwrap_or_default().replace('\n', " | ")
            );
        }
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
