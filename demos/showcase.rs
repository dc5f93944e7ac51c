//! End-to-end composition demo: a grid hosting a bound list, shown to a
//! viewer over a recording transport, with a simulated close click.
//!
//! Run with: `cargo run --example showcase`

use std::rc::Rc;

use relay_ui::{
    CommandArgs, Element, Grid, InMemoryCommands, Label, List, Model, ObservableCollection,
    ProgressBar, Representation, Transport, UiContext, ViewerId, Window, shared,
};

/// Prints every delivery instead of sending it anywhere.
struct StdoutTransport;

impl Transport for StdoutTransport {
    fn show_payload(&self, viewer: &ViewerId, payload: &str) {
        println!("-> show to {viewer}: {payload}");
    }

    fn hide_payload(&self, viewer: &ViewerId, node_name: &str) {
        println!("-> hide {node_name} for {viewer}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let commands = Rc::new(InMemoryCommands::new());
    let ctx = UiContext::new(Rc::new(StdoutTransport), commands.clone());
    let viewer = ViewerId::from("player-1");

    // A collection of greetings drives the list.
    let greetings = ObservableCollection::new();
    for i in 0..6 {
        greetings.push(format!("Hello {i}"));
    }

    let list = List::new(&ctx);
    list.bind_collection(&greetings).expect("default template copies");

    // Tile the list into the top-right cell of a 2x2 grid.
    let mut grid = Grid::new(&ctx, 2, 2);
    grid.set_element(0, 0, shared(list)).expect("cell in range");

    // A progress bar tracking a live model.
    let progress_model = Model::new();
    progress_model.set("progress", 0.3f32);
    let mut health = ProgressBar::new(&ctx);
    health.bind(progress_model.clone().into());

    let body = shared(Label::new(&ctx, "Welcome aboard"));
    let window = Window::named(&ctx, "Test window", Some(body), Some("demo_window"));
    let close_command = window.close_button().command().to_string();

    let mut display = Representation::new(&ctx);
    display.adopt(grid);
    display.adopt(health);
    display.adopt(window);

    display.show(&viewer);

    // Live updates flow without a re-render call.
    greetings.push("A late greeting");
    progress_model.set("progress", 0.85f32);
    display.update(&viewer);

    // Simulate the viewer clicking the window's close button.
    commands.dispatch(&close_command, &CommandArgs::new(viewer.as_str()));

    display.hide(&viewer);
    display.dispose();
}
