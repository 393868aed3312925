//! cave-survey Library.
//! Vermessungsgraph, Projektionen und Formatkonverter als Library exportiert für
//! Tests und Wiederverwendung.

pub mod core;
pub mod graph;
pub mod io;
pub mod shared;

pub use crate::core::{
    close_loop, set_active_station, update, update_with_new_station, update_with_options,
};
pub use crate::core::{Colour, Coord2D, Line2D, PathDetail, Sketch};
pub use crate::core::{Leg, LegId, Station, StationId, Survey, SurveyError, Trip, UpdateOptions};
pub use graph::{Projection2D, Space};
pub use io::{
    import_from_text, Exporter, ImportError, Importer, PocketTopoImporter, SurvexCodec,
    XviExporter, XviOptions,
};
pub use shared::ToolOptions;
