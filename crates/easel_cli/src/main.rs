use easel_forms::serialization::{load_control, save_control};
use easel_forms::{Control, DrawCommand, RecordingSurface};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const USAGE: &str = "Usage: easel <inspect [--json]|render|roundtrip> <fragment.xml>";

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let positional: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();
    if positional.len() != 2 {
        eprintln!("{}", USAGE);
        std::process::exit(1);
    }

    let command = positional[0].as_str();
    let file_path = PathBuf::from(positional[1]);
    if !file_path.exists() {
        eprintln!("Error: file not found: {}", file_path.display());
        std::process::exit(1);
    }

    if let Err(e) = run(command, &file_path, json) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: &str, file_path: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let xml = fs::read_to_string(file_path)?;
    let control = load_control(&xml)?;
    log::debug!("loaded {} from {}", control, file_path.display());

    match command {
        "inspect" => {
            let changes: Vec<_> = control.changed_properties().collect();
            if json {
                let map: serde_json::Map<String, serde_json::Value> = changes
                    .into_iter()
                    .map(|(key, value)| serde_json::to_value(value).map(|v| (key.to_string(), v)))
                    .collect::<Result<_, _>>()?;
                println!("{}", serde_json::to_string_pretty(&map)?);
            } else {
                println!("{}", control);
                for (key, value) in changes {
                    println!("  {} = {}", key, value.to_document_text());
                }
            }
        }
        "render" => {
            let mut surface = RecordingSurface::new();
            control.render(&mut surface);
            for command in &surface.commands {
                println!("{}", describe(command));
            }
        }
        "roundtrip" => println!("{}", save_control(control.as_ref())?),
        other => return Err(format!("unknown command '{}'\n{}", other, USAGE).into()),
    }
    Ok(())
}

fn describe(command: &DrawCommand) -> String {
    let rect = command.rect();
    let at = format!("({}, {}) {}x{}", rect.x(), rect.y(), rect.size.width, rect.size.height);
    match command {
        DrawCommand::FillRect { color, .. } => format!("fill {} {}", at, color.to_hex()),
        DrawCommand::DrawRect { color, width, dash, .. } => {
            format!("rect {} {} {}px {:?}", at, color.to_hex(), width, dash)
        }
        DrawCommand::ImageClipped { image, .. } | DrawCommand::ImageScaled { image, .. } => {
            let mode = if matches!(command, DrawCommand::ImageScaled { .. }) { "scaled" } else { "clipped" };
            let kind = if image.is_placeholder() { " (placeholder)" } else { "" };
            format!("image {} {}{}", mode, at, kind)
        }
    }
}
