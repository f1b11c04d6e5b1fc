mod event_log;
mod layout;

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use serde::Serialize;

use camera_control_core::{
    CameraControlContext, ControlKey, ControlKind, DispatchSummary, HandleKey, InteractionButton, ServiceKey,
};
use camera_control_headless::{DeviceStats, HeadlessConfig, HeadlessPlatform};

use event_log::{EventLog, LoggedEvent};
use layout::DemoLayout;

/// Printed to stdout as JSON when the scenario finishes.
#[derive(Serialize)]
struct Report {
    service: ServiceKey,
    controls: Vec<ControlKey>,
    rejected_controls: Vec<ControlKey>,
    dispatch: DispatchSummary,
    events: Vec<LoggedEvent>,
    device_after_teardown: StatsPayload,
}

#[derive(Serialize)]
struct StatsPayload {
    sessions: usize,
    sliders: usize,
    index_pickers: usize,
    interactions: usize,
    events_posted: u64,
}

impl From<DeviceStats> for StatsPayload {
    fn from(stats: DeviceStats) -> Self {
        Self {
            sessions: stats.sessions,
            sliders: stats.sliders,
            index_pickers: stats.index_pickers,
            interactions: stats.interactions,
            events_posted: stats.events_posted,
        }
    }
}

fn main() {
    env_logger::init();

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let report = DemoLayout::load(path.as_deref()).and_then(run);
    match report.and_then(|r| serde_json::to_string_pretty(&r).map_err(|e| e.to_string())) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("Demo failed: {e}");
            process::exit(1);
        }
    }
}

fn run(layout: DemoLayout) -> Result<Report, String> {
    let platform = HeadlessPlatform::new(HeadlessConfig::default()).map_err(|e| e.to_string())?;
    let simulator = platform.simulator();
    let device = simulator.device().clone();
    let mut ctx = CameraControlContext::with_defaults(platform).map_err(|e| e.to_string())?;
    let events = EventLog::default();

    let service = ctx.services().create();
    if service.is_sentinel() {
        return Err("could not create a camera service".into());
    }

    let mut controls = Vec::new();
    for descriptor in &layout.sliders {
        let key = ctx.controls().create_slider(descriptor);
        if key.is_sentinel() {
            log::warn!("Skipping slider {:?}.", descriptor.localized_title);
            continue;
        }
        ctx.controls().set_slider_action(key, events.slider_action());
        controls.push(key);
    }
    for descriptor in &layout.index_pickers {
        let key = ctx.controls().create_index_picker(descriptor);
        if key.is_sentinel() {
            log::warn!("Skipping index picker {:?}.", descriptor.localized_title);
            continue;
        }
        ctx.controls().set_index_picker_action(key, events.index_action());
        controls.push(key);
    }

    // Attach what fits; anything past the session's capacity stays detached.
    let max = ctx.services().max_controls_count(service);
    let (attached, overflow) = controls.split_at(controls.len().min(max));
    if !attached.is_empty() && !ctx.services().set_controls(service, attached) {
        return Err("set_controls failed".into());
    }

    ctx.services().set_controls_delegate(service, events.delegate());
    ctx.services().set_running(service, true);

    let shutter = ctx
        .interactions()
        .create_separated(events.button("primary"), events.button("secondary"));

    // The user opens the overlay, moves every control, and leaves.
    simulator.show_controls(service);
    simulator.enter_fullscreen(service);
    for &control in attached {
        match ctx.controls().kind(control) {
            Some(ControlKind::Slider) => {
                let target = ctx.controls().value(control) + 1.3;
                simulator.drag_slider(control, target);
            }
            Some(ControlKind::IndexPicker) => {
                simulator.select_index(control, 1);
            }
            None => {}
        }
    }
    simulator.exit_fullscreen(service);
    simulator.hide_controls(service);

    // Hardware buttons arrive from their own thread.
    let presses = simulator
        .spawn_button_presses(shutter, InteractionButton::Primary, 3, Duration::from_millis(5))
        .map_err(|e| e.to_string())?;
    simulator.press_and_cancel(shutter, InteractionButton::Secondary);
    let posted = presses.join().map_err(|_| "button thread panicked".to_string())?;
    log::info!("Button thread posted {posted} presses.");

    // A press still in flight when the interaction goes away is dropped.
    simulator.press(shutter, InteractionButton::Primary);
    ctx.interactions().destroy(shutter);

    let dispatch = ctx.dispatch_pending();
    ctx.services().destroy(service);
    drop(ctx);

    Ok(Report {
        service,
        controls: attached.to_vec(),
        rejected_controls: overflow.to_vec(),
        dispatch,
        events: events.take(),
        device_after_teardown: device.stats().into(),
    })
}
