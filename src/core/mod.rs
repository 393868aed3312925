//! Core-Domänentypen: Stationen, Messzüge, Survey, Skizzen und der Updater.

pub mod error;
pub mod geometry;
pub mod leg;
pub mod sketch;
pub mod station;
/// Survey-Aggregat
///
/// - Survey: Arena für alle Stationen und Messzüge
/// - Station: Messpunkt mit abgehenden Messzügen
/// - Leg: Einzelmessung, optional mit Zielstation
pub mod survey;
pub mod trip;
pub mod updater;

pub use error::SurveyError;
pub use geometry::{flip_vertically, Coord2D, Coord3D, Line2D};
pub use leg::{Leg, LegId};
pub use sketch::{Colour, PathDetail, Sketch};
pub use station::{Station, StationId};
pub use survey::{Survey, Traversal, DEFAULT_ORIGIN_NAME};
pub use trip::{Role, TeamEntry, Trip};
pub use updater::{
    close_loop, set_active_station, update, update_with_new_station, update_with_options,
    UpdateOptions, UpdateOutcome,
};
