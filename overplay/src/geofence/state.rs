//! Geofence lifecycle as a pure transition function.

use std::fmt;

use super::point::GeoPoint;
use super::source::AuthorizationStatus;

/// Why the geofence cannot run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableReason {
    /// Location services are off device-wide. Terminal.
    ServicesDisabled,
    /// The user denied or restricted access. Left when access is granted.
    PermissionDenied,
}

/// Internal geofence state, including the reference point while active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeofenceState {
    Initializing,
    Unavailable(UnavailableReason),
    Authorizing,
    /// Monitoring. `reference` is `None` until the first fix after entry.
    Active { reference: Option<GeoPoint> },
    Inactive,
}

/// Published geofence state, without payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeofenceSessionState {
    #[default]
    Initializing,
    Unavailable,
    Authorizing,
    Active,
    Inactive,
}

impl fmt::Display for GeofenceSessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeofenceSessionState::Initializing => write!(f, "initializing"),
            GeofenceSessionState::Unavailable => write!(f, "unavailable"),
            GeofenceSessionState::Authorizing => write!(f, "authorizing"),
            GeofenceSessionState::Active => write!(f, "active"),
            GeofenceSessionState::Inactive => write!(f, "inactive"),
        }
    }
}

/// Values a transition reads but does not own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeofenceContext {
    /// Whether the owner currently wants monitoring on (last of start/stop).
    pub monitoring_requested: bool,
    pub distance_threshold_m: f64,
}

/// Inputs to the geofence lifecycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeofenceInput {
    /// `start()` was called; carries the current authorization status.
    Start { authorization: AuthorizationStatus },
    Stop,
    /// Authorization was invalidated; carries the new status.
    AuthorizationChanged(AuthorizationStatus),
    LocationUpdated(GeoPoint),
}

/// Side effects the session must perform after a transition, in order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeofenceCommand {
    RequestAuthorization,
    StartUpdates,
    StopUpdates,
    DisplacementExceeded { distance_m: f64 },
}

type Transition = (GeofenceState, Vec<GeofenceCommand>);

impl GeofenceState {
    /// Next state and the commands to run.
    pub fn transition(self, input: GeofenceInput, context: &GeofenceContext) -> Transition {
        use GeofenceState::*;

        match (self, input) {
            (Initializing, GeofenceInput::Start { authorization }) => {
                Self::evaluate(authorization, context)
            }

            (Unavailable(UnavailableReason::ServicesDisabled), _) => (self, Vec::new()),

            (Unavailable(UnavailableReason::PermissionDenied), GeofenceInput::AuthorizationChanged(status))
                if status.is_authorized() =>
            {
                Self::granted(context)
            }

            (Authorizing, GeofenceInput::AuthorizationChanged(status)) => match status {
                AuthorizationStatus::Authorized => Self::granted(context),
                AuthorizationStatus::Denied | AuthorizationStatus::Restricted => {
                    (Unavailable(UnavailableReason::PermissionDenied), Vec::new())
                }
                AuthorizationStatus::NotDetermined | AuthorizationStatus::Unsupported => {
                    (self, Vec::new())
                }
            },

            (Active { .. }, GeofenceInput::Stop) => (Inactive, vec![GeofenceCommand::StopUpdates]),
            (Inactive, GeofenceInput::Start { .. }) => Self::enter_active(),

            (Active { .. }, GeofenceInput::AuthorizationChanged(status)) => match status {
                AuthorizationStatus::NotDetermined => (
                    Authorizing,
                    vec![
                        GeofenceCommand::StopUpdates,
                        GeofenceCommand::RequestAuthorization,
                    ],
                ),
                AuthorizationStatus::Denied | AuthorizationStatus::Restricted => (
                    Unavailable(UnavailableReason::PermissionDenied),
                    vec![GeofenceCommand::StopUpdates],
                ),
                AuthorizationStatus::Authorized | AuthorizationStatus::Unsupported => {
                    (self, Vec::new())
                }
            },

            (Inactive, GeofenceInput::AuthorizationChanged(status)) => match status {
                AuthorizationStatus::NotDetermined => {
                    (Authorizing, vec![GeofenceCommand::RequestAuthorization])
                }
                AuthorizationStatus::Denied | AuthorizationStatus::Restricted => {
                    (Unavailable(UnavailableReason::PermissionDenied), Vec::new())
                }
                AuthorizationStatus::Authorized | AuthorizationStatus::Unsupported => {
                    (self, Vec::new())
                }
            },

            (Active { reference: None }, GeofenceInput::LocationUpdated(point)) => (
                Active {
                    reference: Some(point),
                },
                Vec::new(),
            ),

            (Active { reference: Some(reference) }, GeofenceInput::LocationUpdated(point)) => {
                let distance_m = reference.distance_to(&point);
                if distance_m >= context.distance_threshold_m {
                    (
                        Active {
                            reference: Some(point),
                        },
                        vec![GeofenceCommand::DisplacementExceeded { distance_m }],
                    )
                } else {
                    (self, Vec::new())
                }
            }

            (state, _) => (state, Vec::new()),
        }
    }

    /// Evaluate authorization on the first start.
    fn evaluate(authorization: AuthorizationStatus, context: &GeofenceContext) -> Transition {
        match authorization {
            AuthorizationStatus::Authorized => Self::granted(context),
            AuthorizationStatus::NotDetermined => (
                GeofenceState::Authorizing,
                vec![GeofenceCommand::RequestAuthorization],
            ),
            AuthorizationStatus::Denied
            | AuthorizationStatus::Restricted
            | AuthorizationStatus::Unsupported => (
                GeofenceState::Unavailable(UnavailableReason::PermissionDenied),
                Vec::new(),
            ),
        }
    }

    fn granted(context: &GeofenceContext) -> Transition {
        if context.monitoring_requested {
            Self::enter_active()
        } else {
            (GeofenceState::Inactive, Vec::new())
        }
    }

    fn enter_active() -> Transition {
        (
            GeofenceState::Active { reference: None },
            vec![GeofenceCommand::StartUpdates],
        )
    }

    /// Payload-free view for publishing.
    pub fn published(&self) -> GeofenceSessionState {
        match self {
            GeofenceState::Initializing => GeofenceSessionState::Initializing,
            GeofenceState::Unavailable(_) => GeofenceSessionState::Unavailable,
            GeofenceState::Authorizing => GeofenceSessionState::Authorizing,
            GeofenceState::Active { .. } => GeofenceSessionState::Active,
            GeofenceState::Inactive => GeofenceSessionState::Inactive,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, GeofenceState::Active { .. })
    }

    pub fn reference(&self) -> Option<GeoPoint> {
        match self {
            GeofenceState::Active { reference } => *reference,
            _ => None,
        }
    }
}
