use gpui::MouseButton;

use crate::axis::AxisLayoutCache;
use crate::geom::{ScreenPoint, ScreenRect};
use crate::interaction::{HitRegion, PlotRegions};
use crate::series::SeriesId;
use crate::transform::Transform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DragMode {
    Pan,
    ZoomRect,
}

#[derive(Debug, Clone)]
pub(crate) struct DragState {
    pub(crate) mode: DragMode,
    pub(crate) start: ScreenPoint,
    pub(crate) last: ScreenPoint,
    pub(crate) active: bool,
}

impl DragState {
    pub(crate) fn new(mode: DragMode, start: ScreenPoint) -> Self {
        Self {
            mode,
            start,
            last: start,
            active: false,
        }
    }
}

/// A press that becomes a click unless it turns into a drag.
#[derive(Debug, Clone)]
pub(crate) struct ClickState {
    pub(crate) region: HitRegion,
    pub(crate) button: MouseButton,
}

#[derive(Debug, Clone)]
pub(crate) struct LegendEntry {
    pub(crate) series_id: SeriesId,
    pub(crate) row_rect: ScreenRect,
}

#[derive(Debug, Clone)]
pub(crate) struct LegendLayout {
    pub(crate) rect: ScreenRect,
    pub(crate) entries: Vec<LegendEntry>,
}

#[derive(Debug, Clone)]
pub(crate) struct PlotUiState {
    pub(crate) x_layout: AxisLayoutCache,
    pub(crate) y_layout: AxisLayoutCache,
    pub(crate) regions: PlotRegions,
    pub(crate) transform: Option<Transform>,
    pub(crate) drag: Option<DragState>,
    pub(crate) pending_click: Option<ClickState>,
    pub(crate) selection_rect: Option<ScreenRect>,
    pub(crate) hover: Option<ScreenPoint>,
    pub(crate) legend_layout: Option<LegendLayout>,
}

impl Default for PlotUiState {
    fn default() -> Self {
        let empty = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(0.0, 0.0));
        Self {
            x_layout: AxisLayoutCache::default(),
            y_layout: AxisLayoutCache::default(),
            regions: PlotRegions {
                plot: empty,
                x_axis: empty,
                y_axis: empty,
            },
            transform: None,
            drag: None,
            pending_click: None,
            selection_rect: None,
            hover: None,
            legend_layout: None,
        }
    }
}

impl PlotUiState {
    pub(crate) fn clear_interaction(&mut self) {
        self.drag = None;
        self.pending_click = None;
        self.selection_rect = None;
    }

    pub(crate) fn legend_hit(&self, point: ScreenPoint) -> Option<SeriesId> {
        let layout = self.legend_layout.as_ref()?;
        if !layout.rect.contains(point) {
            return None;
        }
        layout
            .entries
            .iter()
            .find(|entry| entry.row_rect.contains(point))
            .map(|entry| entry.series_id)
    }
}
