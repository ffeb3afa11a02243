use anyhow::Context;
use log::{info, warn};
use regression_playground::{Event, Playground, PlaygroundConfig};
use tokio::io::{self, AsyncBufReadExt, BufReader};

enum Input {
    Line(Option<String>),
    Trained(regression_playground::Result<()>),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = PlaygroundConfig::from_env().context("failed to load the configuration")?;
    let mut playground = Playground::new(&config);
    let mut lines = BufReader::new(io::stdin()).lines();

    info!("playground ready, reading events from stdin");
    println!("{playground}");

    loop {
        let training = playground.is_training();
        let input = tokio::select! {
            line = lines.next_line() => Input::Line(line.context("failed to read stdin")?),
            done = playground.settle(), if training => Input::Trained(done),
        };

        let line = match input {
            Input::Trained(done) => {
                report(&playground, done);
                continue;
            }
            Input::Line(None) => break,
            Input::Line(Some(line)) => line,
        };

        match line.trim() {
            "quit" => break,
            "" | "show" => {
                println!("{playground}");
                continue;
            }
            _ => {}
        }

        let event = match line.parse::<Event>() {
            Ok(event) => event,
            Err(e) => {
                warn!("{e}");
                eprintln!("{e}");
                continue;
            }
        };

        // Text input has no disabled button, so a prediction waits for the outstanding fit.
        if event == Event::Predict && playground.is_training() {
            let done = playground.settle().await;
            report(&playground, done);
        }

        match playground.handle(event) {
            Ok(()) => println!("{playground}"),
            Err(e) => eprintln!("{e}"),
        }
    }

    if playground.is_training() {
        let done = playground.settle().await;
        report(&playground, done);
    }

    Ok(())
}

fn report(playground: &Playground, done: regression_playground::Result<()>) {
    match done {
        Ok(()) => println!("{playground}"),
        Err(e) => eprintln!("{e}"),
    }
}
