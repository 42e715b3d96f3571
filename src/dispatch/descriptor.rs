//! Declarative catalog of every supported control event
//!
//! One descriptor per event replaces a per-event handler function: the
//! generic interpreter in [`super::control`] drives validation, forwarding
//! and status side effects entirely from this table.

use crate::messages::EventType;

use super::validate::FieldRule;

/// A single status-field mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEffect {
    Recording(bool),
    VideoPushing(bool),
    AudioPulling(bool),
    /// Copy the validated `rtmp_url` field into the status
    CaptureRtmpUrl,
    /// Copy the validated `rtsp_url` field into the status
    CaptureRtspUrl,
}

/// Declarative description of one control event
#[derive(Debug)]
pub struct CommandDescriptor {
    /// Fields that must be present in `data`, each with its validation
    /// rule. Events with no entries forward no data.
    pub fields: &'static [(&'static str, FieldRule)],
    /// Mutations applied unconditionally before the send attempt
    pub pre_send: &'static [StatusEffect],
    /// Mutations applied only when the send succeeded
    pub post_send: &'static [StatusEffect],
}

const fn descriptor(
    fields: &'static [(&'static str, FieldRule)],
    pre_send: &'static [StatusEffect],
    post_send: &'static [StatusEffect],
) -> CommandDescriptor {
    CommandDescriptor {
        fields,
        pre_send,
        post_send,
    }
}

static NO_PAYLOAD: CommandDescriptor = descriptor(&[], &[], &[]);

static START_RTMP: CommandDescriptor = descriptor(
    &[("rtmp_url", FieldRule::Present)],
    &[],
    &[StatusEffect::VideoPushing(true), StatusEffect::CaptureRtmpUrl],
);

static STOP_RTMP: CommandDescriptor =
    descriptor(&[], &[], &[StatusEffect::VideoPushing(false)]);

static START_RTSP: CommandDescriptor = descriptor(
    &[("rtsp_url", FieldRule::Present)],
    &[StatusEffect::AudioPulling(true), StatusEffect::CaptureRtspUrl],
    &[],
);

static STOP_RTSP: CommandDescriptor =
    descriptor(&[], &[], &[StatusEffect::AudioPulling(false)]);

static START_RECORD: CommandDescriptor =
    descriptor(&[], &[StatusEffect::Recording(true)], &[]);

static STOP_RECORD: CommandDescriptor =
    descriptor(&[], &[StatusEffect::Recording(false)], &[]);

static DZOOM: CommandDescriptor = descriptor(&[("dzoom", FieldRule::NonNegativeInt)], &[], &[]);

static STREAM_RES: CommandDescriptor =
    descriptor(&[("stream_res", FieldRule::Resolution)], &[], &[]);

static STREAM_BITRATE: CommandDescriptor = descriptor(
    &[("stream_bitrate", FieldRule::IntRange(1, 4_000_000))],
    &[],
    &[],
);

static STREAM_FRAMERATE: CommandDescriptor = descriptor(
    &[("stream_framerate", FieldRule::IntRange(1, 120))],
    &[],
    &[],
);

static LED: CommandDescriptor = descriptor(&[("led", FieldRule::IntOneOf(&[0, 1]))], &[], &[]);

static EXPOSURE: CommandDescriptor = descriptor(
    &[("exposure", FieldRule::IntOneOf(&[0, 1, 2, 3, 4]))],
    &[],
    &[],
);

static FILTER: CommandDescriptor =
    descriptor(&[("filter", FieldRule::IntOneOf(&[0, 1, 2]))], &[], &[]);

static MIC_SENSITIVITY: CommandDescriptor = descriptor(
    &[("mic_sensitivity", FieldRule::IntOneOf(&[0, 1, 2, 3, 4, 5]))],
    &[],
    &[],
);

static FOV: CommandDescriptor =
    descriptor(&[("fov", FieldRule::IntOneOf(&[90, 110, 140]))], &[], &[]);

static SCREEN: CommandDescriptor = descriptor(
    &[
        ("screenName", FieldRule::Present),
        ("url", FieldRule::Present),
        ("roomId", FieldRule::Present),
    ],
    &[],
    &[],
);

/// Look up the descriptor for an event; `None` for events outside the
/// control catalog (including device-originated ones like `heartbeat`)
#[must_use]
pub fn lookup(event: &EventType) -> Option<&'static CommandDescriptor> {
    match event {
        EventType::DeviceInfo | EventType::PowerOff => Some(&NO_PAYLOAD),
        EventType::StartRtmp => Some(&START_RTMP),
        EventType::StopRtmp => Some(&STOP_RTMP),
        EventType::StartRtsp => Some(&START_RTSP),
        EventType::StopRtsp => Some(&STOP_RTSP),
        EventType::StartRecord => Some(&START_RECORD),
        EventType::StopRecord => Some(&STOP_RECORD),
        EventType::Dzoom => Some(&DZOOM),
        EventType::StreamRes => Some(&STREAM_RES),
        EventType::StreamBitrate => Some(&STREAM_BITRATE),
        EventType::StreamFramerate => Some(&STREAM_FRAMERATE),
        EventType::Led => Some(&LED),
        EventType::Exposure => Some(&EXPOSURE),
        EventType::Filter => Some(&FILTER),
        EventType::MicSensitivity => Some(&MIC_SENSITIVITY),
        EventType::Fov => Some(&FOV),
        EventType::Screen => Some(&SCREEN),
        EventType::DeviceJoin | EventType::Heartbeat | EventType::Unknown(_) => None,
    }
}
