use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use float_panels::{
    Document, Indicator, InputEvent, Key, KeyEvent, Modifiers, NodeId, PanelBlueprint,
    PanelConfig, PanelHost, PanelManager, PanelNodes, PanelResult, PointerEvent,
};

#[derive(Parser, Debug)]
#[command(
    name = "panel-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Event throughput benchmark for the panel manager"
)]
struct BenchCli {
    /// Number of panels in the document.
    #[arg(short = 'p', long = "panels", default_value_t = 16)]
    panels: usize,

    /// Number of input events to replay.
    #[arg(short = 'e', long = "events", default_value_t = 1_000_000)]
    events: u64,

    /// Seed for the event stream; the same seed replays the same stream.
    #[arg(short = 's', long = "seed", default_value_t = 0x5EED)]
    seed: u64,
}

impl BenchCli {
    fn validate(&self) -> Result<(), String> {
        if !(1..=10_000).contains(&self.panels) {
            return Err("panels must be between 1 and 10000".to_string());
        }
        if self.events == 0 {
            return Err("events must be at least 1".to_string());
        }
        Ok(())
    }
}

fn main() -> io::Result<()> {
    let args = BenchCli::parse();
    args.validate()
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;

    let mut bench = Bench::new(args.panels, args.seed)?;
    let start = Instant::now();
    for step in 0..args.events {
        bench
            .step()
            .map_err(|err| io::Error::other(format!("event {step}: {err}")))?;
        bench
            .check()
            .map_err(|msg| io::Error::other(format!("event {step}: {msg}")))?;
    }
    let stats = BenchStats {
        events: args.events,
        elapsed: start.elapsed(),
        moves: bench.moves,
        closed: bench.closed,
    };
    println!("{}", stats.report(&args));
    Ok(())
}

struct Bench {
    manager: PanelManager<Document>,
    nodes: Vec<PanelNodes>,
    rng: Lcg,
    moves: u64,
    closed: u64,
}

impl Bench {
    fn new(count: usize, seed: u64) -> io::Result<Self> {
        let mut doc = Document::new();
        let nodes: Vec<PanelNodes> = (0..count)
            .map(|i| doc.build_panel(&PanelBlueprint::new(format!("bench {i}"))))
            .collect();
        let mut manager = PanelManager::new(doc);
        for n in &nodes {
            manager
                .init(n.root, PanelConfig::new())
                .map_err(io::Error::other)?;
        }
        Ok(Self {
            manager,
            nodes,
            rng: Lcg::new(seed),
            moves: 0,
            closed: 0,
        })
    }

    fn step(&mut self) -> PanelResult<()> {
        let Some(panel) = self.pick_live() else {
            return self.reopen();
        };
        let x = (self.rng.next() % 2_000) as i32 - 500;
        let y = (self.rng.next() % 2_000) as i32 - 500;
        let event = match self.rng.next() % 16 {
            0..=2 => InputEvent::PointerDown(PointerEvent::at(panel.handle, x, y)),
            3 => InputEvent::PointerDown(PointerEvent::at(panel.body, x, y)),
            4 => InputEvent::TouchStart(PointerEvent::at(panel.handle, x, y)),
            5..=8 => {
                self.moves += 1;
                InputEvent::PointerMove(PointerEvent::nowhere(x, y))
            }
            9 => InputEvent::PointerUp(PointerEvent::nowhere(x, y)),
            10 => InputEvent::KeyDown(KeyEvent::new(panel.handle, Key::Enter)),
            11 | 12 => {
                let keys = [Key::Up, Key::Down, Key::Left, Key::Right];
                let key = keys[self.rng.next() as usize % keys.len()];
                let modifiers = match self.rng.next() % 3 {
                    0 => Modifiers::NONE,
                    1 => Modifiers::SHIFT,
                    _ => Modifiers::CTRL,
                };
                InputEvent::KeyDown(KeyEvent::new(panel.handle, key).with_modifiers(modifiers))
            }
            13 => InputEvent::KeyDown(KeyEvent::new(panel.handle, Key::Tab)),
            14 => match panel.minimize {
                Some(target) if !self.manager.is_minimized(panel.root) => {
                    InputEvent::Click { target }
                }
                _ => return self.manager.restore(panel.root),
            },
            _ => {
                if self.rng.next() % 64 != 0 {
                    return Ok(());
                }
                self.closed += 1;
                match panel.close {
                    Some(target) => InputEvent::Click { target },
                    None => return Ok(()),
                }
            }
        };
        self.manager.handle_event(event);
        Ok(())
    }

    fn pick_live(&mut self) -> Option<PanelNodes> {
        let live: Vec<PanelNodes> = self
            .nodes
            .iter()
            .copied()
            .filter(|n| self.manager.is_registered(n.root))
            .collect();
        if live.is_empty() {
            return None;
        }
        Some(live[self.rng.next() as usize % live.len()])
    }

    /// Replace closed panels so the stream keeps exercising the manager.
    fn reopen(&mut self) -> PanelResult<()> {
        let doc = self.manager.host_mut();
        let fresh: Vec<PanelNodes> = (0..self.nodes.len())
            .map(|i| doc.build_panel(&PanelBlueprint::new(format!("bench {i}"))))
            .collect();
        for n in &fresh {
            self.manager.init(n.root, PanelConfig::new())?;
        }
        self.nodes = fresh;
        Ok(())
    }

    /// At most one panel carries the moving indicator, and only while a
    /// session is active on it.
    fn check(&self) -> Result<(), String> {
        let host = self.manager.host();
        let moving: Vec<NodeId> = self
            .manager
            .panels()
            .into_iter()
            .filter(|id| host.has_indicator(*id, Indicator::Moving))
            .collect();
        let expected: Vec<NodeId> = self.manager.active_panel().into_iter().collect();
        if moving != expected {
            return Err(format!(
                "moving panels {moving:?} but active session on {expected:?}"
            ));
        }
        Ok(())
    }
}

struct BenchStats {
    events: u64,
    elapsed: Duration,
    moves: u64,
    closed: u64,
}

impl BenchStats {
    fn report(&self, args: &BenchCli) -> String {
        let secs = self.elapsed.as_secs_f64();
        let per_sec = if secs > 0.0 {
            self.events as f64 / secs
        } else {
            0.0
        };
        indoc::formatdoc!(
            r#"
            Panel bench completed.
            Panels: {panels} | Seed: {seed:#x}
            Events: {events} in {secs:.3}s (~{per_sec:.0}/s)
            Pointer moves: {moves} | Close clicks: {closed}
            "#,
            panels = args.panels,
            seed = args.seed,
            events = self.events,
            secs = secs,
            per_sec = per_sec,
            moves = self.moves,
            closed = self.closed,
        )
    }
}

struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 0xA5A5_A5A5_1234_5678,
        }
    }

    fn next(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_stream_runs_clean() {
        let mut bench = Bench::new(4, 0x5EED).unwrap();
        for step in 0..20_000 {
            bench.step().unwrap_or_else(|err| panic!("event {step}: {err}"));
            bench.check().unwrap_or_else(|msg| panic!("event {step}: {msg}"));
        }
        assert!(bench.moves > 0);
    }
}
