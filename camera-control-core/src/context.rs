use log::info;

use crate::bridge::dispatch::{CallbackBridge, DispatchSummary};
use crate::bridge::queue::EventQueue;
use crate::control::ControlTable;
use crate::facade::control_manager::ControlManager;
use crate::facade::interaction_manager::InteractionManager;
use crate::facade::service_manager::ServiceManager;
use crate::interaction::InteractionTable;
use crate::models::config::ContextConfig;
use crate::models::error::CameraControlError;
use crate::models::keys::ResourceKind;
use crate::models::log_target;
use crate::registry::resource_registry::ResourceRegistry;
use crate::session::ServiceTable;
use crate::traits::platform::CameraPlatform;

/// Owns every registry plus the native platform they draw resources from.
///
/// All mutation happens through `&mut self`, so the thread that owns the
/// context is the coordinating context. Native threads only ever see the
/// [`EventQueue`]; their events are delivered by [`dispatch_pending`](Self::dispatch_pending).
///
/// ```text
/// native thread ─▶ EventQueue ─▶ dispatch_pending ─▶ handler(handle, payload)
///                                     │
///                                     └─ liveness + generation check against the registry
/// ```
pub struct CameraControlContext<P: CameraPlatform> {
    pub(crate) platform: P,
    pub(crate) services: ServiceTable<P>,
    pub(crate) controls: ControlTable<P>,
    pub(crate) interactions: InteractionTable<P::Interaction>,
    pub(crate) bridge: CallbackBridge,
}

impl<P: CameraPlatform> CameraControlContext<P> {
    pub fn new(platform: P, config: ContextConfig) -> Result<Self, CameraControlError> {
        config.validate().map_err(CameraControlError::ConfigurationFailed)?;

        let context = Self {
            platform,
            services: ResourceRegistry::new(ResourceKind::Service, config.service_keys.clone())?,
            controls: ResourceRegistry::new(ResourceKind::Control, config.control_keys.clone())?,
            interactions: ResourceRegistry::new(ResourceKind::Interaction, config.interaction_keys.clone())?,
            bridge: CallbackBridge::default(),
        };
        info!(target: log_target::COMMON, "Camera control context ready: {config:?}");
        Ok(context)
    }

    /// Context with the default handle ranges.
    pub fn with_defaults(platform: P) -> Result<Self, CameraControlError> {
        Self::new(platform, ContextConfig::default())
    }

    pub fn services(&mut self) -> ServiceManager<'_, P> {
        ServiceManager::new(self)
    }

    pub fn controls(&mut self) -> ControlManager<'_, P> {
        ControlManager::new(self)
    }

    pub fn interactions(&mut self) -> InteractionManager<'_, P> {
        InteractionManager::new(self)
    }

    /// A producer handle for the native event queue. Cloneable and `Send`.
    pub fn event_queue(&self) -> EventQueue {
        self.bridge.queue().clone()
    }

    /// Deliver the native events queued so far.
    pub fn dispatch_pending(&mut self) -> DispatchSummary {
        self.bridge
            .dispatch(&self.services, &self.controls, &self.interactions)
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn service_table(&self) -> &ServiceTable<P> {
        &self.services
    }

    pub fn control_table(&self) -> &ControlTable<P> {
        &self.controls
    }

    pub fn interaction_table(&self) -> &InteractionTable<P::Interaction> {
        &self.interactions
    }
}

impl<P: CameraPlatform> Drop for CameraControlContext<P> {
    /// Release every native resource still registered. Services go first so
    /// their controls are detached before the controls are released.
    fn drop(&mut self) {
        let services: Vec<_> = self.services.keys().collect();
        for key in services {
            if let Some(mut controller) = self.services.destroy(key) {
                controller.teardown(&mut self.controls);
            }
        }
        let controls: Vec<_> = self.controls.keys().collect();
        for key in controls {
            if let Some(mut record) = self.controls.destroy(key) {
                record.release();
            }
        }
        let interactions: Vec<_> = self.interactions.keys().collect();
        for key in interactions {
            if let Some(mut record) = self.interactions.destroy(key) {
                record.release();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use approx::assert_relative_eq;
    use parking_lot::Mutex;

    use super::*;
    use crate::bridge::queue::NativeEvent;
    use crate::models::descriptors::{ControlKind, IndexPickerDescriptor, SliderDescriptor};
    use crate::models::events::{CaptureEventPhase, ControlsNotification, InteractionButton, InteractionRouting};
    use crate::models::keys::{ControlKey, HandleKey, InteractionKey, ServiceKey};
    use crate::session::delegate::SessionControlsDelegate;
    use crate::testing::FakePlatform;

    fn context() -> CameraControlContext<FakePlatform> {
        CameraControlContext::with_defaults(FakePlatform::default()).unwrap()
    }

    fn small_context(width: u8) -> CameraControlContext<FakePlatform> {
        let config = ContextConfig {
            service_keys: 0..=width - 1,
            control_keys: 0..=u16::from(width) - 1,
            interaction_keys: 0..=u16::from(width) - 1,
        };
        CameraControlContext::new(FakePlatform::default(), config).unwrap()
    }

    fn counter() -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        (Arc::clone(&count), count)
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ContextConfig {
            service_keys: 0..=ServiceKey::MAX,
            ..ContextConfig::default()
        };
        let result = CameraControlContext::new(FakePlatform::default(), config);
        assert!(matches!(result, Err(CameraControlError::ConfigurationFailed(_))));
    }

    #[test]
    fn attach_scenario() {
        let mut ctx = context();
        let s1 = ctx.services().create();
        let c1 = ctx.controls().create_slider_range("Zoom", "plus.magnifyingglass", 1.0, 5.0);
        let c2 = ctx
            .controls()
            .create_index_picker(&IndexPickerDescriptor::new("Lens", "camera", vec!["Wide".into(), "Tele".into()]));
        assert_eq!((s1, c1, c2), (0, 0, 1));

        let mut services = ctx.services();
        assert!(services.set_controls(s1, &[c1, c2]));
        assert_eq!(services.control_count(s1), 2);
        assert!(services.remove_control(s1, c1));
        assert_eq!(services.control_count(s1), 1);
        assert!(services.add_control(s1, c1));
        assert_eq!(services.control_count(s1), 2);

        assert!(services.destroy(s1));
        assert!(!services.is_running(s1));
        assert!(!services.contains(s1));
    }

    #[test]
    fn handles_stay_unique_under_churn() {
        let mut ctx = small_context(8);
        let mut live: HashSet<ControlKey> = HashSet::new();
        let mut seed = 7u32;
        for _ in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            if seed % 3 == 0 && !live.is_empty() {
                let victim = *live.iter().next().unwrap();
                assert!(ctx.controls().destroy(victim));
                live.remove(&victim);
            } else {
                let key = ctx.controls().create_slider_range("Exposure", "sun.max", -2.0, 2.0);
                if live.len() == 8 {
                    assert!(key.is_sentinel());
                } else {
                    assert!(!key.is_sentinel());
                    assert!(live.insert(key), "handle {key} issued twice");
                }
            }
            assert_eq!(ctx.controls().len(), live.len());
        }
    }

    #[test]
    fn exhaustion_returns_sentinel_and_keeps_existing() {
        let mut ctx = small_context(3);
        let keys: Vec<ServiceKey> = (0..3).map(|_| ctx.services().create()).collect();
        assert_eq!(keys, vec![0, 1, 2]);

        assert_eq!(ctx.services().create(), ServiceKey::SENTINEL);
        assert!(keys.iter().all(|&k| ctx.services().contains(k)));
        assert_eq!(ctx.services().len(), 3);
    }

    #[test]
    fn failed_create_leaves_no_record() {
        let mut ctx = context();
        ctx.platform_mut().fail_creates = true;
        assert_eq!(ctx.services().create(), ServiceKey::SENTINEL);
        assert_eq!(ctx.interactions().create_combined(|_, _| {}), InteractionKey::SENTINEL);
        assert!(ctx.services().is_empty());

        ctx.platform_mut().fail_creates = false;
        assert_eq!(ctx.services().create(), 0);
    }

    #[test]
    fn invalid_descriptors_are_rejected() {
        let mut ctx = context();
        let mut controls = ctx.controls();
        assert!(controls.create_slider_range("Bad", "x", 2.0, 1.0).is_sentinel());
        assert!(controls.create_slider_range_step("Bad", "x", 0.0, 1.0, 0.0).is_sentinel());
        assert!(controls.create_slider_values("Bad", "x", Vec::new()).is_sentinel());
        assert!(controls
            .create_index_picker(&IndexPickerDescriptor::new("Bad", "x", Vec::new()))
            .is_sentinel());
        assert!(controls.is_empty());
    }

    #[test]
    fn destroy_twice_reports_true_then_false() {
        let mut ctx = context();
        let service = ctx.services().create();
        let control = ctx.controls().create_slider_values("Tone", "f.cursive", vec![0.0, 0.5, 1.0]);
        let interaction = ctx.interactions().create_combined(|_, _| {});

        assert!(ctx.services().destroy(service));
        assert!(!ctx.services().destroy(service));
        assert!(ctx.controls().destroy(control));
        assert!(!ctx.controls().destroy(control));
        assert!(ctx.interactions().destroy(interaction));
        assert!(!ctx.interactions().destroy(interaction));
    }

    #[test]
    fn empty_replacement_keeps_attachments() {
        let mut ctx = context();
        let service = ctx.services().create();
        let control = ctx.controls().create_slider_range("Zoom", "plus", 1.0, 2.0);
        assert!(ctx.services().add_control(service, control));

        assert!(!ctx.services().set_controls(service, &[]));
        assert!(ctx.services().contains_control(service, control));
        assert!(ctx.services().remove_all_controls(service));
        assert_eq!(ctx.services().control_count(service), 0);
    }

    #[test]
    fn capacity_stops_at_maximum() {
        let mut ctx = context();
        let service = ctx.services().create();
        let max = ctx.services().max_controls_count(service);
        let controls: Vec<ControlKey> = (0..=max)
            .map(|_| ctx.controls().create_slider_range("Zoom", "plus", 1.0, 2.0))
            .collect();

        assert!(ctx.services().set_controls(service, &controls[..max]));
        assert!(!ctx.services().add_control(service, controls[max]));
        assert_eq!(ctx.services().control_count(service), max);
        assert_eq!(ctx.controls().attached_service(controls[max]), None);
    }

    #[test]
    fn controls_unsupported_by_session() {
        let mut ctx = context();
        ctx.platform_mut().supports_controls = false;
        let service = ctx.services().create();
        let control = ctx.controls().create_slider_range("Zoom", "plus", 1.0, 2.0);

        assert!(!ctx.services().supports_controls(service));
        assert!(!ctx.services().add_control(service, control));
        assert_eq!(ctx.services().control_count(service), 0);
    }

    #[test]
    fn destroying_attached_control_detaches_it() {
        let mut ctx = context();
        let service = ctx.services().create();
        let control = ctx.controls().create_slider_range("Zoom", "plus", 1.0, 2.0);
        assert!(ctx.services().add_control(service, control));
        assert_eq!(ctx.controls().attached_service(control), Some(service));

        assert!(ctx.controls().destroy(control));
        assert!(!ctx.services().contains_control(service, control));
        assert_eq!(ctx.services().control_count(service), 0);
        let session = ctx.service_table().get(service).unwrap().session();
        assert!(session.native_controls.is_empty());
    }

    #[test]
    fn destroying_service_frees_its_controls() {
        let mut ctx = context();
        let s1 = ctx.services().create();
        let s2 = ctx.services().create();
        let control = ctx.controls().create_slider_range("Zoom", "plus", 1.0, 2.0);
        assert!(ctx.services().set_running(s1, true));
        assert!(ctx.services().add_control(s1, control));

        assert!(!ctx.services().add_control(s2, control));
        assert!(ctx.services().destroy(s1));
        assert_eq!(ctx.controls().attached_service(control), None);
        assert!(ctx.services().add_control(s2, control));
    }

    #[test]
    fn running_state_round_trip() {
        let mut ctx = context();
        let service = ctx.services().create();
        let mut services = ctx.services();
        assert!(!services.is_running(service));
        assert!(services.set_running(service, true));
        assert!(services.set_running(service, true));
        assert!(services.is_running(service));
        assert!(services.set_running(service, false));
        assert!(!services.is_running(service));
        assert!(!services.set_running(99, true));
    }

    #[test]
    fn absent_handles_yield_defaults() {
        let mut ctx = context();
        let services = ctx.services();
        assert_eq!(services.max_controls_count(5), 0);
        assert_eq!(services.control_count(5), 0);
        assert!(services.controls(5).is_empty());

        let controls = ctx.controls();
        assert_relative_eq!(controls.value(9), 0.0);
        assert_eq!(controls.kind(9), None);
        assert!(controls.localized_index_titles(9).is_empty());
        assert!(!ctx.interactions().is_enabled(3));
        assert_eq!(ctx.interactions().routing(3), None);
    }

    #[test]
    fn slider_operations() {
        let mut ctx = context();
        let mut descriptor = SliderDescriptor::range_and_step("Exposure", "sun.max", -2.0, 2.0, 0.5);
        descriptor.localized_value_format = Some("%@ EV".into());
        let key = ctx.controls().create_slider(&descriptor);

        let mut controls = ctx.controls();
        assert_eq!(controls.kind(key), Some(ControlKind::Slider));
        assert_relative_eq!(controls.value(key), -2.0);
        assert!(controls.set_value(key, 0.7));
        assert_relative_eq!(controls.value(key), 0.5);
        assert!(!controls.set_value(key, f32::NAN));
        assert!(controls.set_prominent_values(key, &[0.0, 1.0]));
        assert_eq!(controls.prominent_values(key), vec![0.0, 1.0]);
        assert_eq!(controls.localized_value_format(key).as_deref(), Some("%@ EV"));
        assert!(controls.set_localized_value_format(key, None));
        assert_eq!(controls.localized_value_format(key), None);
        assert!(controls.set_accessibility_identifier(key, Some("exposure")));
        assert_eq!(controls.accessibility_identifier(key).as_deref(), Some("exposure"));
        assert!(controls.set_enabled(key, false));
        assert!(!controls.is_enabled(key));

        assert!(!controls.set_selected_index(key, 0));
        assert_eq!(controls.number_of_indexes(key), 0);
    }

    #[test]
    fn index_picker_operations() {
        let mut ctx = context();
        let titles = vec!["Auto".to_string(), "Daylight".to_string(), "Cloudy".to_string()];
        let key = ctx
            .controls()
            .create_index_picker(&IndexPickerDescriptor::new("White Balance", "sun.haze", titles.clone()));

        let mut controls = ctx.controls();
        assert_eq!(controls.kind(key), Some(ControlKind::IndexPicker));
        assert_eq!(controls.number_of_indexes(key), 3);
        assert_eq!(controls.localized_index_titles(key), titles);
        assert!(controls.set_selected_index(key, 1));
        assert_eq!(controls.selected_index(key), 1);
        assert!(!controls.set_selected_index(key, 3));
        assert_eq!(controls.selected_index(key), 1);

        assert!(!controls.set_value(key, 1.0));
        assert!(!controls.set_slider_action(key, |_, _| {}));
    }

    #[test]
    fn slider_action_receives_native_value_changes() {
        let mut ctx = context();
        let key = ctx.controls().create_slider_range("Zoom", "plus", 1.0, 5.0);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        assert!(ctx
            .controls()
            .set_slider_action(key, move |control, value| sink.lock().push((control, value))));

        ctx.platform().control_sinks[&key].value_changed(2.5);
        let summary = ctx.dispatch_pending();

        assert_eq!(summary.delivered, 1);
        assert_eq!(*seen.lock(), vec![(key, 2.5)]);
    }

    #[test]
    fn index_picker_action_receives_native_changes() {
        let mut ctx = context();
        let key = ctx
            .controls()
            .create_index_picker(&IndexPickerDescriptor::new("Lens", "camera", vec!["A".into(), "B".into()]));
        let (count, handle) = counter();
        assert!(ctx.controls().set_index_picker_action(key, move |_, index| {
            handle.fetch_add(index, Ordering::SeqCst);
        }));

        ctx.platform().control_sinks[&key].index_changed(1);
        ctx.platform().control_sinks[&key].value_changed(1.0);
        let summary = ctx.dispatch_pending();

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(summary.delivered, 1);
        assert_eq!(summary.dropped_invalid, 1);
    }

    #[test]
    fn event_for_destroyed_handle_is_dropped() {
        let mut ctx = context();
        let (count, handle) = counter();
        let interaction = ctx.interactions().create_combined(move |_, _| {
            handle.fetch_add(1, Ordering::SeqCst);
        });
        let sink = ctx.platform().interaction_sinks[&interaction].clone();

        sink.phase(InteractionButton::Primary, CaptureEventPhase::Began);
        assert!(ctx.interactions().destroy(interaction));
        let summary = ctx.dispatch_pending();

        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(summary.dropped_stale, 1);
        assert_eq!(summary.delivered, 0);
    }

    #[test]
    fn reused_handle_ignores_predecessor_events() {
        let mut ctx = small_context(1);
        let (old_count, old_handle) = counter();
        let first = ctx.interactions().create_combined(move |_, _| {
            old_handle.fetch_add(1, Ordering::SeqCst);
        });
        let stale_sink = ctx.platform().interaction_sinks[&first].clone();
        assert!(ctx.interactions().destroy(first));

        let (new_count, new_handle) = counter();
        let second = ctx.interactions().create_combined(move |_, _| {
            new_handle.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(first, second);

        stale_sink.phase(InteractionButton::Primary, CaptureEventPhase::Began);
        ctx.platform().interaction_sinks[&second].phase(InteractionButton::Primary, CaptureEventPhase::Ended);
        let summary = ctx.dispatch_pending();

        assert_eq!(old_count.load(Ordering::SeqCst), 0);
        assert_eq!(new_count.load(Ordering::SeqCst), 1);
        assert_eq!(summary.dropped_stale, 1);
    }

    #[test]
    fn separated_interaction_routes_by_button() {
        let mut ctx = context();
        let phases = Arc::new(Mutex::new(Vec::new()));
        let (primary_log, secondary_log) = (Arc::clone(&phases), Arc::clone(&phases));
        let key = ctx.interactions().create_separated(
            move |_, phase| primary_log.lock().push((InteractionButton::Primary, phase)),
            move |_, phase| secondary_log.lock().push((InteractionButton::Secondary, phase)),
        );
        assert_eq!(ctx.interactions().routing(key), Some(InteractionRouting::Separated));

        let sink = ctx.platform().interaction_sinks[&key].clone();
        sink.phase(InteractionButton::Primary, CaptureEventPhase::Began);
        sink.phase(InteractionButton::Secondary, CaptureEventPhase::Cancelled);
        sink.raw_phase(InteractionButton::Primary, 1);
        ctx.dispatch_pending();

        assert_eq!(
            *phases.lock(),
            vec![
                (InteractionButton::Primary, CaptureEventPhase::Began),
                (InteractionButton::Secondary, CaptureEventPhase::Cancelled),
                (InteractionButton::Primary, CaptureEventPhase::Ended),
            ]
        );
    }

    #[test]
    fn malformed_phase_is_dropped() {
        let mut ctx = context();
        let (count, handle) = counter();
        let key = ctx.interactions().create_combined(move |_, _| {
            handle.fetch_add(1, Ordering::SeqCst);
        });

        ctx.platform().interaction_sinks[&key].raw_phase(InteractionButton::Secondary, 9);
        let summary = ctx.dispatch_pending();

        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(summary.dropped_invalid, 1);
    }

    #[test]
    fn delegate_receives_session_notifications() {
        let mut ctx = context();
        let service = ctx.services().create();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let delegate = SessionControlsDelegate::uniform(Arc::new(
            move |key: ServiceKey, notification: ControlsNotification| sink.lock().push((key, notification)),
        ));

        let events = ctx.platform().service_sinks[&service].clone();
        events.notify(ControlsNotification::DidBecomeActive);
        assert_eq!(ctx.dispatch_pending().dropped_unhandled, 1);

        assert!(ctx.services().set_controls_delegate(service, delegate));
        events.notify(ControlsNotification::WillEnterFullscreenAppearance);
        assert_eq!(ctx.dispatch_pending().delivered, 1);

        assert!(ctx.services().remove_controls_delegate(service));
        events.notify(ControlsNotification::DidBecomeInactive);
        assert_eq!(ctx.dispatch_pending().dropped_unhandled, 1);

        assert_eq!(
            *seen.lock(),
            vec![(service, ControlsNotification::WillEnterFullscreenAppearance)]
        );
    }

    #[test]
    fn raw_events_are_checked_for_liveness() {
        let mut ctx = context();
        let (count, handle) = counter();
        let key = ctx.interactions().create_combined(move |_, _| {
            handle.fetch_add(1, Ordering::SeqCst);
        });
        let queue = ctx.event_queue();

        queue.post(NativeEvent::Interaction {
            interaction: key,
            button: InteractionButton::Primary,
            phase: 0,
        });
        queue.post(NativeEvent::Interaction {
            interaction: key + 1,
            button: InteractionButton::Primary,
            phase: 0,
        });
        let summary = ctx.dispatch_pending();

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(summary.delivered, 1);
        assert_eq!(summary.dropped_stale, 1);
        assert!(ctx.event_queue().is_empty());
    }

    #[test]
    fn destroying_record_drops_its_handlers() {
        let mut ctx = context();
        let (count, handle) = counter();
        let key = ctx.interactions().create_combined(move |_, _| {
            handle.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(Arc::strong_count(&count), 2);

        assert!(ctx.interactions().destroy(key));
        assert_eq!(Arc::strong_count(&count), 1);
    }

    #[test]
    fn dropping_context_releases_natives() {
        let mut ctx = context();
        let (count, handle) = counter();
        let service = ctx.services().create();
        let control = ctx.controls().create_slider_range("Zoom", "plus", 1.0, 2.0);
        assert!(ctx.services().add_control(service, control));
        assert!(ctx.controls().set_slider_action(control, move |_, _| {
            handle.fetch_add(1, Ordering::SeqCst);
        }));

        drop(ctx);
        assert_eq!(Arc::strong_count(&count), 1);
    }
}
