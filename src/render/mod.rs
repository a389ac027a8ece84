//! Chart rendering: vector scenes for the three exportable charts and their
//! PNG rasterization.

pub mod charts;
pub mod raster;
pub mod scene;

pub use charts::{
    ChartRenderer, ELEMENTS_FILE_NAME, PILLARS_FILE_NAME, SHARE_CARD_FILE_NAME, SHARE_CARD_SIZE,
    WIDE_CHART_SIZE,
};
pub use raster::{rasterize, rasterize_to_file};
pub use scene::{ChartDocument, SceneNode, TextAnchor};
