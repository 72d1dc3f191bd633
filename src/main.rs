use map_changes::{
    AttributeForm, ChangeAction, EditorConfig, Feature, InMemorySurface, LayerId, MapEditor,
    SessionUpdate,
};
use ringbuf::traits::Consumer;
use serde::Deserialize;
use std::path::Path;

/// Recorded drawing session to replay
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReplayScript {
    layer: Option<String>,
    #[serde(default)]
    attribute_form: AttributeForm,
    #[serde(default)]
    form_valid: bool,
    events: Vec<ChangeAction>,
    /// Number of undo requests issued after all events
    #[serde(default)]
    undo: usize,
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(script_path) = args.next() else {
        eprintln!("usage: map_changes <events.json> [config.ron]");
        std::process::exit(2);
    };

    let config = match args.next() {
        Some(path) => EditorConfig::load(Path::new(&path)),
        None => EditorConfig::load_default(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    let script: ReplayScript = match std::fs::read_to_string(&script_path)
        .map_err(|e| e.to_string())
        .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()))
    {
        Ok(script) => script,
        Err(e) => {
            eprintln!("ERROR: cannot read {}: {}", script_path, e);
            std::process::exit(1);
        }
    };

    // The drawing library creates features before emitting events about them
    let mut surface = InMemorySurface::new();
    for action in &script.events {
        for feature in &action.features {
            surface.insert_feature(Feature::new(feature.id.as_str()));
        }
    }

    let (mut editor, mut notifications) = MapEditor::new(surface, &config);
    editor.set_current_layer(script.layer.map(LayerId::new));
    editor.session_mut().commit_batch(vec![
        SessionUpdate::SetAttributeForm(script.attribute_form),
        SessionUpdate::UpdateAttributeFormValidity(script.form_valid),
    ]);

    for action in script.events {
        editor.enqueue(action);
    }
    for result in editor.process_pending() {
        match result {
            Ok(outcome) => println!("applied: {:?}", outcome),
            Err(e) => println!("rejected: {}", e),
        }
    }

    for _ in 0..script.undo {
        if let Ok(entry) = editor.undo_change() {
            println!("undone: {} v{}", entry.change_type, entry.version);
        }
    }

    println!("\n=== Features ===");
    for feature in editor.surface().features() {
        match serde_json::to_string(&feature.properties) {
            Ok(properties) => println!("{} {}", feature.id, properties),
            Err(e) => eprintln!("{}: {}", feature.id, e),
        }
    }
    println!("\nchange log: {} entries", editor.change_log().len());

    while let Some(notification) = notifications.try_pop() {
        println!("[{:?}] {}", notification.level, notification.message);
    }
}
