use clap::Parser;
use flowscribe::diagram::{DiagramDefinition, EdgeRecord, NodeRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;

const ACTIONS: &[&str] = &[
    "Fill form",
    "Review application",
    "Send notification",
    "Archive document",
    "Request approval",
    "Update record",
    "Check inventory",
    "Prepare invoice",
    "Contact customer",
    "Register request",
];

const CONDITIONS: &[&str] = &[
    "Is approved?",
    "Data complete?",
    "In stock?",
    "Payment received?",
];

/// OCR noise the quality filter is expected to reject.
const GARBAGE: &[&str] = &["~~", "|||", "#@!", ".."];

/// A CLI tool to generate synthetic detector output for the Flowscribe pipeline
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_diagram.json")]
    output: String,

    /// Number of activity nodes between start and end
    #[arg(long, default_value_t = 8)]
    nodes: usize,

    /// Probability that an activity is followed by a decision
    #[arg(long, default_value_t = 0.2)]
    decision_rate: f64,

    /// Probability that a node label is replaced with OCR noise
    #[arg(long, default_value_t = 0.05)]
    noise_rate: f64,

    /// Number of edges pointing at nodes that do not exist
    #[arg(long, default_value_t = 0)]
    dangling: usize,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

struct Layout {
    row: usize,
}

impl Layout {
    const ROW_HEIGHT: f64 = 120.0;
    const WIDTH: f64 = 220.0;
    const HEIGHT: f64 = 60.0;

    /// Places the next node one row below the previous one, jittered horizontally.
    fn next_bbox(&mut self, rng: &mut StdRng) -> [f64; 4] {
        let x1 = 200.0 + rng.random_range(-40.0..40.0);
        let y1 = 40.0 + self.row as f64 * Self::ROW_HEIGHT;
        self.row += 1;
        [x1, y1, x1 + Self::WIDTH, y1 + Self::HEIGHT]
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    for (name, rate) in [("--decision-rate", cli.decision_rate), ("--noise-rate", cli.noise_rate)] {
        if !(0.0..=1.0).contains(&rate) {
            eprintln!("Error: {} ({}) must be between 0 and 1", name, rate);
            std::process::exit(1);
        }
    }

    let seed = cli.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = StdRng::seed_from_u64(seed);
    println!(
        "Generating a diagram with {} activities (seed {})...",
        cli.nodes, seed
    );

    let definition = generate_diagram(&mut rng, &cli);
    println!(
        "-> Generated {} node(s) and {} edge(s).",
        definition.nodes.len(),
        definition.edges.len()
    );

    let json_output = serde_json::to_string_pretty(&definition)?;
    fs::write(&cli.output, json_output)?;

    println!("Successfully generated and saved diagram to '{}'", cli.output);
    Ok(())
}

/// Builds a top-to-bottom chain from a start ellipse to an end ellipse. A decision
/// branches to a side activity that rejoins the chain, and to the next activity.
fn generate_diagram(rng: &mut StdRng, cli: &Cli) -> DiagramDefinition {
    let mut layout = Layout { row: 0 };
    let mut nodes = vec![
        NodeRecord::new("start", "ellipse", "Start")
            .with_semantic("start")
            .with_bbox(layout.next_bbox(rng)),
    ];
    let mut edges = Vec::new();
    let mut previous = "start".to_string();

    for i in 0..cli.nodes {
        let id = format!("a{}", i);
        let label = pick_label(rng, ACTIONS, cli.noise_rate);
        nodes.push(NodeRecord::new(&id, "rectangle", label).with_bbox(layout.next_bbox(rng)));
        edges.push(EdgeRecord::new(&previous, &id));
        previous = id;

        if i + 1 < cli.nodes && rng.random_bool(cli.decision_rate) {
            let decision = format!("d{}", i);
            let side = format!("s{}", i);
            let condition = CONDITIONS[rng.random_range(0..CONDITIONS.len())];
            nodes.push(
                NodeRecord::new(&decision, "diamond", condition).with_bbox(layout.next_bbox(rng)),
            );

            let mut side_bbox = layout.next_bbox(rng);
            side_bbox[0] += 300.0;
            side_bbox[2] += 300.0;
            let label = pick_label(rng, ACTIONS, cli.noise_rate);
            nodes.push(NodeRecord::new(&side, "rectangle", label).with_bbox(side_bbox));

            edges.push(EdgeRecord::new(&previous, &decision));
            edges.push(EdgeRecord::new(&decision, &side));
            edges.push(EdgeRecord::new(&side, format!("a{}", i + 1)));
            // The next iteration links the decision to the following activity.
            previous = decision;
        }
    }

    nodes.push(
        NodeRecord::new("end", "ellipse", "End")
            .with_semantic("end")
            .with_bbox(layout.next_bbox(rng)),
    );
    edges.push(EdgeRecord::new(&previous, "end"));

    for i in 0..cli.dangling {
        edges.push(EdgeRecord::new(&previous, format!("missing{}", i)));
    }

    DiagramDefinition { nodes, edges }
}

fn pick_label(rng: &mut StdRng, labels: &[&str], noise_rate: f64) -> String {
    if rng.random_bool(noise_rate) {
        GARBAGE[rng.random_range(0..GARBAGE.len())].to_string()
    } else {
        labels[rng.random_range(0..labels.len())].to_string()
    }
}
