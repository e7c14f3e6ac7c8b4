//! A full viewer session on the headless backend.

use std::sync::Arc;
use std::time::{Duration, Instant};

use lifeview::{Viewer, ViewerConfig};
use lifeview_core::FrameMailbox;
use lifeview_networking::FrameOutcome;
use lifeview_rendering::{BackendCall, DrawOutcome, PointRenderer, RecordingBackend};
use lifeview_shared::{pack_indices, FrameHeader, GridDims, WireFormat};
use lifeview_ui::InputEvent;

fn headered_frame(side: u32, alive: &[usize]) -> Vec<u8> {
    let body = pack_indices(alive.iter().copied(), GridDims::new(side).body_len());
    let mut message = FrameHeader::new(side).to_bytes().to_vec();
    message.extend_from_slice(&body);
    message
}

fn session(config: &ViewerConfig) -> (Viewer<RecordingBackend>, Arc<FrameMailbox>) {
    let mailbox = Arc::new(FrameMailbox::new());
    let renderer = PointRenderer::new(RecordingBackend::new(), 1024, 768);
    (Viewer::new(renderer, config, Arc::clone(&mailbox)), mailbox)
}

#[test]
fn headered_stream_drives_grid_and_points() {
    let config = ViewerConfig::from_toml_str("[grid]\nwire_format = \"headered\"").unwrap();
    assert_eq!(config.grid.wire_format, WireFormat::Headered);
    let (mut viewer, mailbox) = session(&config);

    mailbox.post(headered_frame(10, &[0, 11, 99]));
    let report = viewer.tick().unwrap();
    assert_eq!(
        report.frame,
        Some(FrameOutcome::Bootstrapped {
            points: 3,
            grid: GridDims::new(10)
        })
    );
    assert_eq!(viewer.renderer().uniforms().dimensions, [10.0, 10.0]);
    assert_eq!(viewer.renderer().backend().last_points(), &[0.0, 11.0, 99.0]);

    // Corrupt message: previous points stay on screen.
    mailbox.post(vec![0xDE, 0xAD]);
    let report = viewer.tick().unwrap();
    assert!(matches!(report.frame, Some(FrameOutcome::Dropped(_))));
    assert_eq!(report.draw, DrawOutcome::Presented);
    assert_eq!(viewer.renderer().point_count(), 3);

    mailbox.post(headered_frame(10, &[50]));
    let report = viewer.tick().unwrap();
    assert_eq!(report.frame, Some(FrameOutcome::Updated { points: 1 }));
}

#[test]
fn zoom_settles_while_frames_stream() {
    let config = ViewerConfig::default();
    let (mut viewer, mailbox) = session(&config);

    viewer.handle_input(InputEvent::Wheel { delta_y: -1.0 });
    assert!((viewer.zoom().desired() - 15.0).abs() < 1e-4);

    let mut ticks = 0;
    loop {
        if ticks % 3 == 0 {
            mailbox.post(vec![0b1010_0000; 32]);
        }
        let report = viewer.tick().unwrap();
        ticks += 1;
        if !report.zoomed {
            break;
        }
        assert!(ticks < 1_000, "zoom never settled");
    }

    assert!(viewer.zoom().is_settled());
    assert!(viewer.renderer().transform().scale > 14.8);
    assert_eq!(viewer.renderer().stats().reallocations, 1);
    assert_eq!(viewer.renderer().stats().draws, ticks);
}

#[test]
fn uniforms_flush_only_when_changed() {
    let (mut viewer, _) = session(&ViewerConfig::default());

    for _ in 0..10 {
        viewer.tick().unwrap();
    }
    let writes = viewer
        .renderer()
        .backend()
        .calls()
        .iter()
        .filter(|call| matches!(call, BackendCall::WriteUniforms(_)))
        .count();
    assert_eq!(writes, 1);
}

#[test]
fn scheduler_paces_ticks() {
    let config = ViewerConfig::from_toml_str("[render]\ntarget_fps = 100").unwrap();
    let (mut viewer, _) = session(&config);
    let start = Instant::now();
    viewer.scheduler_mut().start(start);

    let mut delivered = 0;
    for ms in 0..100u64 {
        if viewer
            .tick_if_due(start + Duration::from_millis(ms))
            .unwrap()
            .is_some()
        {
            delivered += 1;
        }
    }

    assert_eq!(delivered, 10);
    viewer.shutdown();
    assert!(viewer.tick_if_due(start + Duration::from_secs(1)).unwrap().is_none());
}

#[test]
fn frame_beyond_device_limit_keeps_session_alive() {
    let mailbox = Arc::new(FrameMailbox::new());
    let renderer = PointRenderer::new(RecordingBackend::new().with_max_points(128), 1024, 768);
    let mut viewer = Viewer::new(renderer, &ViewerConfig::default(), Arc::clone(&mailbox));

    mailbox.post(vec![0x80; 16]);
    viewer.tick().unwrap();
    assert_eq!(viewer.renderer().point_count(), 16);

    mailbox.post(vec![0xFF; 17]);
    let report = viewer.tick().unwrap();
    assert_eq!(
        report.frame,
        Some(FrameOutcome::Oversized {
            requested: 136,
            max: 128
        })
    );
    assert_eq!(report.draw, DrawOutcome::Presented);
    assert_eq!(viewer.renderer().point_count(), 16);
    assert_eq!(viewer.renderer().capacity(), 128);
}
