#![forbid(unsafe_code)]

//! Layout container.
//!
//! A container owns a root `div` and an ordered list of items. Every
//! [`Container::render`] clears the root and rebuilds it from the list:
//!
//! - `fit` mounts the first item only,
//! - `hbox`/`vbox` mount every plain item in order,
//! - `border` mounts region items, attaches their decorations (collapse
//!   toggles and splitters) and runs a reflow.
//!
//! Items that cannot be mounted are reported in the [`RenderReport`] and
//! logged at `warn` level. Region elements belong to the caller: the
//! container writes their classes and box style but never destroys them.

use std::any::Any;

use litext_core::dom::{Document, NodeId, Position};
use litext_core::error::DomError;
use litext_core::event::{EventOutcome, PointerEvent, PointerEventKind};
use litext_core::geometry::Size;
use litext_core::{debug, trace, warn};
use litext_layout::{
    Alignment, Axis, BorderLayout, DragEffect, LayoutMode, Region, RegionBounds, RegionInput,
    SplitterDrag,
};
use serde::{Deserialize, Serialize};

use crate::Widget;
use crate::collapse::{COLLAPSED_CLASS, CollapseToggle};
use crate::component::ComponentCore;
use crate::error::LitextError;

/// Class carried by every container root.
pub const CONTAINER_CLASS: &str = "ext-container";

/// Class of a splitter handle.
pub const SPLITTER_CLASS: &str = "splitter";

const LAYOUT_MODES: [LayoutMode; 4] = [
    LayoutMode::Hbox,
    LayoutMode::Vbox,
    LayoutMode::Fit,
    LayoutMode::Border,
];

/// A region entry of a border layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionItem {
    pub region: Region,
    /// Caller-owned content element.
    #[serde(rename = "el")]
    pub element: NodeId,
    #[serde(default)]
    pub collapsible: bool,
    #[serde(default)]
    pub collapsed: bool,
    /// Attach a drag splitter on the region's inner edge.
    #[serde(default)]
    pub split: bool,
    #[serde(flatten)]
    pub bounds: RegionBounds,
}

impl RegionItem {
    #[must_use]
    pub fn new(region: Region, element: NodeId) -> Self {
        Self {
            region,
            element,
            collapsible: false,
            collapsed: false,
            split: false,
            bounds: RegionBounds::default(),
        }
    }

    #[must_use]
    pub fn collapsible(mut self, collapsible: bool) -> Self {
        self.collapsible = collapsible;
        self
    }

    #[must_use]
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    #[must_use]
    pub fn split(mut self, split: bool) -> Self {
        self.split = split;
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: RegionBounds) -> Self {
        self.bounds = bounds;
        self
    }
}

/// One child of a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// Another component, mounted by its root element.
    Component { id: String, root: NodeId },
    /// A bare element.
    Element(NodeId),
    /// A border region.
    Region(RegionItem),
}

impl Item {
    /// Reference a widget by id and root.
    pub fn component(widget: &dyn Widget) -> Self {
        Self::Component {
            id: widget.core().id().to_string(),
            root: widget.core().root(),
        }
    }

    /// Element mounted for this item.
    #[must_use]
    pub const fn element(&self) -> NodeId {
        match self {
            Self::Component { root, .. } => *root,
            Self::Element(node) => *node,
            Self::Region(item) => item.element,
        }
    }

    #[must_use]
    pub const fn as_region(&self) -> Option<&RegionItem> {
        match self {
            Self::Region(item) => Some(item),
            _ => None,
        }
    }
}

impl From<NodeId> for Item {
    fn from(node: NodeId) -> Self {
        Self::Element(node)
    }
}

impl From<RegionItem> for Item {
    fn from(item: RegionItem) -> Self {
        Self::Region(item)
    }
}

/// Why an item was left out of a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A region item in a non-border layout.
    RegionOutsideBorder(Region),
    /// A plain item in a border layout.
    PlainItemInBorder,
    /// The item's element no longer exists.
    DeadNode(NodeId),
    /// Mounting the element would put the container inside itself.
    WouldContainContainer,
    /// A later item names the same region.
    SupersededRegion(Region),
}

/// An item left out of a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedItem {
    pub index: usize,
    pub reason: SkipReason,
}

/// Outcome of one render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Indices of mounted items, in mount order.
    pub mounted: Vec<usize>,
    /// Items left out, sorted by index.
    pub skipped: Vec<SkippedItem>,
}

impl RenderReport {
    fn skip(&mut self, index: usize, reason: SkipReason) {
        self.skipped.push(SkippedItem { index, reason });
    }

    /// Whether every item was mounted or intentionally omitted.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Construction options for [`Container`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerConfig {
    pub render_to: NodeId,
    pub layout: LayoutMode,
    pub align: Option<Alignment>,
    pub justify: Option<Alignment>,
    pub items: Vec<Item>,
    /// Render during construction (default `true`).
    pub auto_render: bool,
}

impl ContainerConfig {
    #[must_use]
    pub fn new(render_to: NodeId) -> Self {
        Self {
            render_to,
            layout: LayoutMode::default(),
            align: None,
            justify: None,
            items: Vec::new(),
            auto_render: true,
        }
    }

    #[must_use]
    pub fn with_layout(mut self, layout: LayoutMode) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_align(mut self, align: Alignment) -> Self {
        self.align = Some(align);
        self
    }

    #[must_use]
    pub fn with_justify(mut self, justify: Alignment) -> Self {
        self.justify = Some(justify);
        self
    }

    #[must_use]
    pub fn with_item(mut self, item: impl Into<Item>) -> Self {
        self.items.push(item.into());
        self
    }

    #[must_use]
    pub fn with_items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.items.extend(items);
        self
    }

    #[must_use]
    pub fn with_auto_render(mut self, auto_render: bool) -> Self {
        self.auto_render = auto_render;
        self
    }
}

#[derive(Debug, Clone)]
struct SplitterHandle {
    node: NodeId,
    element: NodeId,
    drag: SplitterDrag,
}

/// A container of components, elements or border regions.
#[derive(Debug)]
pub struct Container {
    core: ComponentCore,
    layout: LayoutMode,
    items: Vec<Item>,
    /// Item indices of the regions mounted by the last border render.
    regions: Vec<usize>,
    toggles: Vec<CollapseToggle>,
    splitters: Vec<SplitterHandle>,
    last_layout: Option<BorderLayout>,
    last_report: RenderReport,
}

impl Container {
    /// Create a container; renders right away unless `auto_render` is off.
    pub fn new(doc: &mut Document, config: ContainerConfig) -> Result<Self, LitextError> {
        let core = ComponentCore::new(doc, config.render_to)?;
        let root = core.root();
        doc.add_class(root, CONTAINER_CLASS)?;
        if let Some(align) = config.align {
            doc.set_attribute(root, "align", align.as_str())?;
        }
        if let Some(justify) = config.justify {
            doc.set_attribute(root, "justify", justify.as_str())?;
        }
        let mut container = Self {
            core,
            layout: config.layout,
            items: config.items,
            regions: Vec::new(),
            toggles: Vec::new(),
            splitters: Vec::new(),
            last_layout: None,
            last_report: RenderReport::default(),
        };
        container.apply_layout_class(doc)?;
        if config.auto_render {
            container.render(doc)?;
        }
        Ok(container)
    }

    #[must_use]
    pub const fn layout(&self) -> LayoutMode {
        self.layout
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Report of the most recent render.
    #[must_use]
    pub fn last_report(&self) -> &RenderReport {
        &self.last_report
    }

    /// Layout computed by the most recent border reflow.
    #[must_use]
    pub fn border_layout(&self) -> Option<&BorderLayout> {
        self.last_layout.as_ref()
    }

    /// Mounted region item for `region`.
    #[must_use]
    pub fn region(&self, region: Region) -> Option<&RegionItem> {
        self.regions
            .iter()
            .filter_map(|&index| self.items[index].as_region())
            .find(|item| item.region == region)
    }

    /// Splitter handle element attached to `region`.
    #[must_use]
    pub fn splitter_node(&self, region: Region) -> Option<NodeId> {
        self.splitters
            .iter()
            .find(|handle| handle.drag.region() == region)
            .map(|handle| handle.node)
    }

    /// Collapse toggle attached to `region`.
    #[must_use]
    pub fn toggle_node(&self, region: Region) -> Option<NodeId> {
        self.toggles
            .iter()
            .find(|toggle| toggle.region() == region)
            .map(CollapseToggle::node)
    }

    /// Rebuild the root's children from the item list.
    pub fn render(&mut self, doc: &mut Document) -> Result<RenderReport, LitextError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "container.render",
            component = %self.core.id(),
            layout = %self.layout,
            items = self.items.len()
        )
        .entered();

        let previous_splitters = self.splitters.clone();
        self.clear_decorations(doc)?;
        let root = self.core.root();
        doc.clear_children(root)?;
        self.regions.clear();
        self.last_layout = None;

        let mut report = RenderReport::default();
        match self.layout {
            LayoutMode::Fit => {
                if !self.items.is_empty() {
                    self.mount_plain(doc, 0, &mut report)?;
                }
            }
            LayoutMode::Hbox | LayoutMode::Vbox => {
                for index in 0..self.items.len() {
                    self.mount_plain(doc, index, &mut report)?;
                }
            }
            LayoutMode::Border => {
                self.mount_regions(doc, &mut report)?;
                self.resume_drags(&previous_splitters);
            }
        }

        doc.style_mut(root)?.position =
            (self.layout == LayoutMode::Border).then_some(Position::Relative);
        self.core.mount(doc)?;
        if self.layout == LayoutMode::Border {
            self.reflow(doc)?;
        }

        report.skipped.sort_by_key(|skipped| skipped.index);
        for skipped in &report.skipped {
            warn!(
                component = %self.core.id(),
                index = skipped.index,
                reason = ?skipped.reason,
                "container item skipped"
            );
        }
        debug!(
            component = %self.core.id(),
            mounted = report.mounted.len(),
            skipped = report.skipped.len(),
            "container rendered"
        );
        self.last_report = report.clone();
        Ok(report)
    }

    /// Append an item and re-render.
    pub fn add(
        &mut self,
        doc: &mut Document,
        item: impl Into<Item>,
    ) -> Result<RenderReport, LitextError> {
        self.items.push(item.into());
        self.render(doc)
    }

    /// Switch layout mode and re-render.
    pub fn set_layout(
        &mut self,
        doc: &mut Document,
        layout: LayoutMode,
    ) -> Result<RenderReport, LitextError> {
        self.layout = layout;
        self.apply_layout_class(doc)?;
        self.render(doc)
    }

    /// Recompute the border layout from the current item states and
    /// measured sizes, and write the resulting box styles.
    ///
    /// Does nothing outside the border layout.
    pub fn reflow(&mut self, doc: &mut Document) -> Result<(), LitextError> {
        if self.layout != LayoutMode::Border {
            return Ok(());
        }
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "container.reflow",
            component = %self.core.id(),
            regions = self.regions.len()
        )
        .entered();

        let inputs: Vec<RegionInput> = self
            .regions
            .iter()
            .filter_map(|&index| self.items[index].as_region())
            .map(|item| measure(doc, item))
            .collect();
        let layout = BorderLayout::compute(&inputs);

        for placement in layout.placements() {
            if let Some(item) = self.region(placement.region) {
                let element = item.element;
                placement.apply_to(doc.style_mut(element)?);
            }
        }
        for handle in &self.splitters {
            let region = handle.drag.region();
            if let Some(placement) = layout.splitter(region) {
                placement.apply_to(doc.style_mut(handle.node)?);
            }
            let collapsed = layout.collapsed().contains(&region);
            doc.toggle_class(handle.node, COLLAPSED_CLASS, Some(collapsed))?;
        }
        trace!(
            component = %self.core.id(),
            offsets = ?layout.offsets(),
            "border reflow"
        );
        self.last_layout = Some(layout);
        Ok(())
    }

    /// Set the collapsed flag of a mounted region and reflow.
    ///
    /// Returns `false` when no such region is mounted.
    pub fn set_collapsed(
        &mut self,
        doc: &mut Document,
        region: Region,
        collapsed: bool,
    ) -> Result<bool, LitextError> {
        let Some(index) = self.region_index(region) else {
            return Ok(false);
        };
        let Item::Region(item) = &mut self.items[index] else {
            return Ok(false);
        };
        item.collapsed = collapsed;
        let element = item.element;
        match self.toggles.iter().find(|toggle| toggle.region() == region) {
            Some(toggle) => toggle.sync(doc, collapsed)?,
            None => {
                doc.toggle_class(element, COLLAPSED_CLASS, Some(collapsed))?;
            }
        }
        debug!(component = %self.core.id(), region = %region, collapsed, "region collapse");
        self.reflow(doc)?;
        Ok(true)
    }

    /// Flip the collapsed flag of a mounted region. Returns the new state.
    pub fn toggle_collapse(
        &mut self,
        doc: &mut Document,
        region: Region,
    ) -> Result<Option<bool>, LitextError> {
        let Some(current) = self.region(region).map(|item| item.collapsed) else {
            return Ok(None);
        };
        self.set_collapsed(doc, region, !current)?;
        Ok(Some(!current))
    }

    /// Route a pointer event to splitters and collapse toggles.
    pub fn handle_event(
        &mut self,
        doc: &mut Document,
        event: &PointerEvent,
    ) -> Result<EventOutcome, LitextError> {
        match event.kind {
            PointerEventKind::Down => Ok(self.begin_drag(doc, event)),
            PointerEventKind::Move => self.drag_to(doc, event),
            PointerEventKind::Up => Ok(self.end_drag(event)),
            PointerEventKind::Click => {
                let Some(target) = event.target else {
                    return Ok(EventOutcome::Ignored);
                };
                let Some(region) = self
                    .toggles
                    .iter()
                    .find(|toggle| toggle.is_hit(doc, target))
                    .map(CollapseToggle::region)
                else {
                    return Ok(EventOutcome::Ignored);
                };
                self.toggle_collapse(doc, region)?;
                Ok(EventOutcome::Consumed)
            }
        }
    }

    fn begin_drag(&mut self, doc: &Document, event: &PointerEvent) -> EventOutcome {
        let Some(target) = event.target else {
            return EventOutcome::Ignored;
        };
        let Some(handle) = self
            .splitters
            .iter_mut()
            .find(|handle| doc.contains(handle.node, target))
        else {
            return EventOutcome::Ignored;
        };
        let start = Size::new(doc.offset_width(handle.element), doc.offset_height(handle.element));
        let effect = handle.drag.begin(event, start);
        if !matches!(effect, DragEffect::Started { .. }) {
            return EventOutcome::Ignored;
        }
        debug!(effect = ?effect, "splitter drag started");
        EventOutcome::Consumed
    }

    fn drag_to(
        &mut self,
        doc: &mut Document,
        event: &PointerEvent,
    ) -> Result<EventOutcome, LitextError> {
        let mut resized = false;
        for handle in &mut self.splitters {
            if let DragEffect::Resized { axis, size, .. } = handle.drag.update(event) {
                let style = doc.style_mut(handle.element)?;
                match axis {
                    Axis::Horizontal => style.width = Some(size),
                    Axis::Vertical => style.height = Some(size),
                }
                resized = true;
            }
        }
        if !resized {
            return Ok(EventOutcome::Ignored);
        }
        self.reflow(doc)?;
        Ok(EventOutcome::Consumed)
    }

    fn end_drag(&mut self, event: &PointerEvent) -> EventOutcome {
        let mut outcome = EventOutcome::Ignored;
        for handle in &mut self.splitters {
            let effect = handle.drag.end(event);
            if matches!(effect, DragEffect::Ended { .. }) {
                debug!(effect = ?effect, "splitter drag ended");
                outcome = EventOutcome::Consumed;
            }
        }
        outcome
    }

    /// Remove decorations and detach the root. Caller-owned elements stay
    /// alive.
    pub fn destroy(&mut self, doc: &mut Document) -> Result<(), LitextError> {
        self.clear_decorations(doc)?;
        self.regions.clear();
        self.last_layout = None;
        self.core.destroy(doc)?;
        Ok(())
    }

    /// Keep drags that were in progress before a re-render alive on the
    /// rebuilt splitter of the same region and element.
    fn resume_drags(&mut self, previous: &[SplitterHandle]) {
        for handle in &mut self.splitters {
            let Some(old) = previous.iter().find(|old| {
                old.element == handle.element && old.drag.region() == handle.drag.region()
            }) else {
                continue;
            };
            if handle.drag.adopt_session(&old.drag) {
                trace!(region = %handle.drag.region(), "splitter drag resumed after render");
            }
        }
    }

    fn region_index(&self, region: Region) -> Option<usize> {
        self.regions.iter().copied().find(|&index| {
            self.items[index]
                .as_region()
                .is_some_and(|item| item.region == region)
        })
    }

    fn apply_layout_class(&self, doc: &mut Document) -> Result<(), DomError> {
        let root = self.core.root();
        for mode in LAYOUT_MODES {
            doc.remove_class(root, mode.class_name())?;
        }
        doc.add_class(root, self.layout.class_name())
    }

    fn clear_decorations(&mut self, doc: &mut Document) -> Result<(), DomError> {
        for toggle in self.toggles.drain(..) {
            toggle.detach(doc)?;
        }
        for handle in self.splitters.drain(..) {
            if doc.is_alive(handle.node) {
                doc.remove(handle.node)?;
            }
        }
        Ok(())
    }

    fn mountable(&self, doc: &Document, element: NodeId) -> Result<(), SkipReason> {
        if !doc.is_alive(element) {
            return Err(SkipReason::DeadNode(element));
        }
        if doc.contains(element, self.core.root()) {
            return Err(SkipReason::WouldContainContainer);
        }
        Ok(())
    }

    fn mount_plain(
        &self,
        doc: &mut Document,
        index: usize,
        report: &mut RenderReport,
    ) -> Result<(), DomError> {
        let item = &self.items[index];
        if let Item::Region(region) = item {
            report.skip(index, SkipReason::RegionOutsideBorder(region.region));
            return Ok(());
        }
        let element = item.element();
        if let Err(reason) = self.mountable(doc, element) {
            report.skip(index, reason);
            return Ok(());
        }
        doc.append_child(self.core.root(), element)?;
        report.mounted.push(index);
        Ok(())
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn mount_regions(
        &mut self,
        doc: &mut Document,
        report: &mut RenderReport,
    ) -> Result<(), LitextError> {
        let mut latest: [Option<usize>; 5] = [None; 5];
        for (index, item) in self.items.iter().enumerate() {
            match item {
                Item::Region(region) => {
                    if let Some(previous) = latest[region.region.index()].replace(index) {
                        report.skip(previous, SkipReason::SupersededRegion(region.region));
                    }
                }
                _ => report.skip(index, SkipReason::PlainItemInBorder),
            }
        }
        let mut winners: Vec<usize> = latest.into_iter().flatten().collect();
        winners.sort_unstable();

        let root = self.core.root();
        for index in winners {
            let Some(item) = self.items[index].as_region().copied() else {
                continue;
            };
            if let Err(reason) = self.mountable(doc, item.element) {
                report.skip(index, reason);
                continue;
            }
            doc.add_class(item.element, item.region.class_name())?;
            if item.collapsible {
                self.toggles.push(CollapseToggle::attach(
                    doc,
                    item.region,
                    item.element,
                    index,
                    item.collapsed,
                )?);
            } else {
                doc.toggle_class(item.element, COLLAPSED_CLASS, Some(item.collapsed))?;
            }
            doc.append_child(root, item.element)?;

            if item.split {
                match SplitterDrag::new(item.region, item.bounds) {
                    Ok(drag) => {
                        let node = doc.create_element("div");
                        doc.add_class(node, SPLITTER_CLASS)?;
                        doc.set_attribute(node, "data-region", item.region.as_str())?;
                        doc.append_child(root, node)?;
                        self.splitters.push(SplitterHandle {
                            node,
                            element: item.element,
                            drag,
                        });
                    }
                    Err(err) => {
                        warn!(component = %self.core.id(), index, error = %err, "splitter ignored");
                    }
                }
            }
            self.regions.push(index);
            report.mounted.push(index);
        }
        Ok(())
    }
}

fn measure(doc: &Document, item: &RegionItem) -> RegionInput {
    let style = doc.style(item.element);
    let mut input = RegionInput::new(item.region)
        .collapsed(item.collapsed)
        .rendered(doc.rendered_size(item.element));
    if let Some(width) = style.width {
        input = input.style_width(width);
    }
    if let Some(height) = style.height {
        input = input.style_height(height);
    }
    input
}

impl Widget for Container {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn xtype(&self) -> &'static str {
        "container"
    }

    fn handle_event(
        &mut self,
        doc: &mut Document,
        event: &PointerEvent,
    ) -> Result<EventOutcome, LitextError> {
        Container::handle_event(self, doc, event)
    }

    fn destroy(&mut self, doc: &mut Document) -> Result<(), LitextError> {
        Container::destroy(self, doc)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
