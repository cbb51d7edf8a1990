//! Demo wheel driven through a scripted sequence of host states
//!
//! Run with: cargo run -p radial-overlay -- [output_dir] [--settings <path>]
//!
//! Each frame polls the scripted conditions, moves the hover between elements
//! the way a pointer would, draws the visible elements with the software
//! backend and writes `frame_NN.png` into `output_dir` (default
//! `radial-demo`). Without `--settings` the builtin demo settings are used and
//! nothing is written back.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use radial_core::{
    draw_wheel, sort_for_draw, visible_elements, ConditionalProperties as P,
    ConditionalState as S, ConditionalStateProvider, ConfigStore, ElementDefinition, MsTime, Rgba,
    SpriteDimensions, WheelElement, WheelSettings,
};
use radial_overlay::{disc_texture, RenderError, SoftwareBinding};
use tracing_subscriber::EnvFilter;

const TARGET_SIZE: u32 = 512;
const ICON_SIZE: u32 = 128;
const FRAME_STEP: Duration = Duration::from_millis(40);

const DEMO_SETTINGS: &str = r#"
[wheel]
fade_in_duration_ms = 120
fade_out_duration_ms = 120

[elements.raptor]
keybind = "Alt+1"

[elements.springer]
keybind = "Alt+2"

[elements.skimmer]
keybind = "Alt+3"

[elements.jackal]
keybind = "Alt+4"

[elements.griffon]
keybind = "Alt+5"
sorting_priority = -1

[elements.warclaw]
keybind = "Alt+6"

[elements.skyscale]
shown = false
keybind = "Alt+7"
"#;

/// Replays a fixed list of host states, one per frame, holding the last
struct ScriptedConditions {
    frames: Vec<S>,
    index: usize,
}

impl ConditionalStateProvider for ScriptedConditions {
    fn poll(&mut self) -> S {
        let state = self
            .frames
            .get(self.index)
            .or(self.frames.last())
            .copied()
            .unwrap_or_default();
        self.index += 1;
        state
    }
}

/// Initialize logging, writing to RADIAL_LOG_PATH if set, otherwise stderr.
fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    if let Ok(path) = env::var("RADIAL_LOG_PATH") {
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(file)
                .init();
            return;
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn build_elements(
    binding: &mut SoftwareBinding,
    store: &ConfigStore,
) -> Result<Vec<WheelElement>, RenderError> {
    let defs: [(&str, &str, Rgba, P); 7] = [
        ("raptor", "Raptor", Rgba::from_rgba8([213, 100, 89, 255]), P::empty()),
        ("springer", "Springer", Rgba::from_rgba8([212, 198, 94, 255]), P::empty()),
        (
            "skimmer",
            "Skimmer",
            Rgba::from_rgba8([108, 128, 213, 255]),
            P::VISIBLE_UNDERWATER | P::USABLE_UNDERWATER | P::VISIBLE_ON_WATER | P::USABLE_ON_WATER,
        ),
        ("jackal", "Jackal", Rgba::from_rgba8([120, 183, 197, 255]), P::empty()),
        ("griffon", "Griffon", Rgba::from_rgba8([136, 123, 195, 255]), P::VISIBLE_IN_COMBAT),
        (
            "warclaw",
            "Warclaw",
            Rgba::from_rgba8([186, 112, 84, 255]),
            P::VISIBLE_WVW | P::USABLE_WVW | P::VISIBLE_IN_COMBAT,
        ),
        ("skyscale", "Skyscale", Rgba::from_rgba8([211, 142, 244, 255]), P::empty()),
    ];

    let mut elements = Vec::with_capacity(defs.len());
    for (id, (nickname, name, color, props)) in (1u32..).zip(defs) {
        let texture = binding.register_texture(disc_texture(ICON_SIZE, Rgba::WHITE)?);
        let def = ElementDefinition::new(id, nickname, name)
            .category("Mounts")
            .color(color)
            .props(props)
            .appearance(texture);
        elements.push(WheelElement::new(def, store));
    }
    Ok(elements)
}

/// Move the hover to `next`, stamping exit and enter times like a pointer would
fn update_hover(
    elements: &mut [WheelElement],
    current: &mut Option<u32>,
    next: Option<u32>,
    now: MsTime,
) {
    if *current == next {
        return;
    }
    for element in elements.iter_mut() {
        if Some(element.element_id()) == *current {
            element.set_current_exit_time(now);
        }
        if Some(element.element_id()) == next {
            element.set_current_hover_time(now);
        }
    }
    *current = next;
}

fn run(output_dir: PathBuf, settings_path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = match settings_path {
        Some(path) => ConfigStore::load(path)?,
        None => ConfigStore::from_toml_str(DEMO_SETTINGS)?,
    };
    let settings = WheelSettings::load(&store);

    let mut binding = SoftwareBinding::new(TARGET_SIZE, TARGET_SIZE)?;
    let mut elements = build_elements(&mut binding, &store)?;

    let mut conditions = ScriptedConditions {
        frames: [
            vec![S::empty(); 8],
            vec![S::IN_COMBAT; 4],
            vec![S::UNDERWATER; 4],
            vec![S::IN_WVW | S::IN_COMBAT; 4],
        ]
        .concat(),
        index: 0,
    };
    let hover_script: [(usize, Option<u32>); 5] =
        [(2, Some(1)), (5, Some(3)), (9, Some(5)), (14, None), (16, Some(6))];

    std::fs::create_dir_all(&output_dir)?;
    let wheel_sprite = SpriteDimensions::new(0.5, 0.5, 1.0, 1.0);
    let mut hovered: Option<u32> = None;
    let frame_count = conditions.frames.len();

    for frame in 0..frame_count {
        let now = frame as MsTime * FRAME_STEP.as_millis() as MsTime;
        let state = conditions.poll();

        if let Some(&(_, next)) = hover_script.iter().find(|(f, _)| *f == frame) {
            update_hover(&mut elements, &mut hovered, next, now);
        }

        let mut slots = visible_elements(&elements, state);
        sort_for_draw(&mut slots, |_| 0);
        let hovered_element = hovered.and_then(|id| slots.iter().copied().find(|e| e.element_id() == id));

        binding.begin_frame();
        let report = draw_wheel(&mut binding, &slots, wheel_sprite, now, hovered_element, &settings);

        let path = output_dir.join(format!("frame_{frame:02}.png"));
        binding.save_png(&path)?;
        tracing::info!(
            frame,
            state = ?state,
            visible = slots.len(),
            drawn = report.drawn,
            failed = report.failed,
            hovered = ?hovered_element.map(|e| e.nickname()),
            "Rendered frame"
        );
    }

    // Demonstrate a settings edit surviving the run
    if let Some(griffon) = elements.iter_mut().find(|e| e.nickname() == "griffon") {
        griffon.set_props(&mut store, P::VISIBLE_ALL | P::USABLE_IN_COMBAT)?;
    }
    store.save()?;
    Ok(())
}

fn main() {
    init_logging();

    let mut args = env::args().skip(1);
    let mut output_dir = PathBuf::from("radial-demo");
    let mut settings_path = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--settings" => settings_path = args.next().map(PathBuf::from),
            _ => output_dir = PathBuf::from(arg),
        }
    }

    if let Err(e) = run(output_dir, settings_path) {
        tracing::error!(error = %e, "Demo failed");
        std::process::exit(1);
    }
}
