use rust_vrsync_api::{VRButtonEvent, VRDeviceClass, VRRuntimeEvent, VRRuntimeEventType, VRService};

/// Turns one runtime event into a controller button transition.
///
/// Returns None for events coming from anything but a controller with a
/// known hand, and for every event type other than press/unpress/touch/untouch.
pub fn normalize_event(service: &dyn VRService, event: &VRRuntimeEvent) -> Option<VRButtonEvent> {
    if service.device_class(event.device_index) != VRDeviceClass::Controller {
        return None;
    }

    let hand = service.controller_role(event.device_index)?;
    let pressed = match event.event_type {
        VRRuntimeEventType::ButtonPress | VRRuntimeEventType::ButtonTouch => true,
        VRRuntimeEventType::ButtonUnpress | VRRuntimeEventType::ButtonUntouch => false,
        VRRuntimeEventType::Other(_) => return None,
    };

    Some(VRButtonEvent {
        hand,
        button: event.button,
        pressed,
    })
}

/// Drains the runtime event queue, keeping arrival order.
pub fn drain_events(service: &mut dyn VRService) -> Vec<VRButtonEvent> {
    let mut result = Vec::new();
    while let Some(event) = service.poll_next_event() {
        match normalize_event(service, &event) {
            Some(button_event) => result.push(button_event),
            None => trace!("Dropping runtime event {:?}", event),
        }
    }
    result
}
