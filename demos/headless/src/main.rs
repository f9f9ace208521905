extern crate env_logger;
#[macro_use]
extern crate log;
extern crate rust_vrsync;

use rust_vrsync::{MockServiceCreator, MockVRControlMsg, MockVRInit, VRControllerHand, VRDeviceClass,
                  VRDeviceRole, VREye, VRLayer, VROverlayDesc, VRRuntimeEvent, VRRuntimeEventType, VRSyncConfig,
                  VRSyncContext};
use std::process;

const FRAME_COUNT: u32 = 5;

// Renders a few frames against the mock runtime and prints what the render loop sees.
fn main() {
    env_logger::init();

    let (creator, remote) = MockServiceCreator::new_with_remote(MockVRInit::default());
    let mut context = match VRSyncContext::new(&creator, VRSyncConfig::default()) {
        Ok(context) => context,
        Err(err) => {
            eprintln!("Unable to start VR: {}", err);
            process::exit(1);
        }
    };

    remote.send(MockVRControlMsg::AddDevice {
        index: 1,
        class: VRDeviceClass::Controller,
        role: Some(VRControllerHand::Left),
        serial: Some("LHR-LEFTWAND".into()),
    });
    remote.send(MockVRControlMsg::AddDevice {
        index: 2,
        class: VRDeviceClass::GenericTracker,
        role: None,
        serial: Some("LHR-ABC123".into()),
    });
    remote.send(MockVRControlMsg::PushEvent(VRRuntimeEvent::new(1, VRRuntimeEventType::ButtonPress, 33)));

    if let Err(err) = context.create_overlay("hud", &VROverlayDesc::new(0.5, [1.0, 0.0, -0.2])) {
        warn!("No HUD overlay: {}", err);
    }

    for frame in 0..FRAME_COUNT {
        context.update();

        let hmd = context.device_pose(VRDeviceRole::Hmd);
        println!("frame {}: hmd {:?}", frame, hmd.position);
        println!("  left controller {:?}", context.controller_buttons(VRControllerHand::Left));
        for serial in context.tracker_serials() {
            println!("  tracker {} {:?}", serial, context.tracker_pose(&serial).and_then(|p| p.position));
        }
        for event in context.poll_events() {
            println!("  button event {:?}", event.as_tuple());
        }

        let stereo = context.pre_render();
        println!("  eyes at {:?} {:?}", stereo.left_camera_position, stereo.right_camera_position);
        for eye in [VREye::Left, VREye::Right].iter() {
            if let Err(err) = context.submit_eye(*eye, &VRLayer::new(1)) {
                eprintln!("Submit failed: {}", err);
            }
        }
        context.post_render(true);
    }

    context.release();
}
