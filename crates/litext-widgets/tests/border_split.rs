//! End-to-end border container scenarios driven through host pointer
//! events.

use litext_core::dom::{Document, NodeId};
use litext_core::event::{EventOutcome, PointerEvent};
use litext_core::geometry::Size;
use litext_layout::{LayoutMode, Region, RegionBounds};
use litext_widgets::{
    Button, ButtonConfig, COLLAPSE_TOGGLE_CLASS, ComponentRegistry, Container, ContainerConfig,
    Item, RegionItem, SPLITTER_CLASS, SkipReason, Widget,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;

fn region_el(doc: &mut Document, text: &str) -> NodeId {
    let node = doc.create_element("div");
    doc.set_text_content(node, text).unwrap();
    node
}

/// West region with bounds 50..200 and an explicit width of 100, plus a
/// center.
fn split_container(doc: &mut Document) -> (Container, NodeId, NodeId) {
    let body = doc.body();
    let west = region_el(doc, "nav");
    let center = region_el(doc, "main");
    doc.style_mut(west).unwrap().width = Some(100);
    let container = Container::new(
        doc,
        ContainerConfig::new(body)
            .with_layout(LayoutMode::Border)
            .with_item(
                RegionItem::new(Region::West, west)
                    .split(true)
                    .with_bounds(RegionBounds::default().with_width(Some(50), Some(200))),
            )
            .with_item(RegionItem::new(Region::Center, center)),
    )
    .unwrap();
    (container, west, center)
}

#[test]
fn dragging_west_splitter_resizes_and_reflows() {
    let mut doc = Document::new();
    let (mut container, west, center) = split_container(&mut doc);
    let splitter = container.splitter_node(Region::West).unwrap();
    assert_eq!(doc.style(splitter).left, Some(100));

    let down = PointerEvent::down(splitter, 100, 10);
    assert_eq!(
        container.handle_event(&mut doc, &down).unwrap(),
        EventOutcome::Consumed
    );
    container
        .handle_event(&mut doc, &PointerEvent::moved(70, 10))
        .unwrap();
    container
        .handle_event(&mut doc, &PointerEvent::up(70, 10))
        .unwrap();

    assert_eq!(doc.style(west).width, Some(70));
    assert_eq!(doc.style(center).left, Some(70));
    assert_eq!(doc.style(splitter).left, Some(70));
    assert_eq!(container.border_layout().unwrap().offsets().left, 70);
}

#[test]
fn drag_is_clamped_to_bounds() {
    let mut doc = Document::new();
    let (mut container, west, center) = split_container(&mut doc);
    let splitter = container.splitter_node(Region::West).unwrap();

    container
        .handle_event(&mut doc, &PointerEvent::down(splitter, 100, 0))
        .unwrap();
    container
        .handle_event(&mut doc, &PointerEvent::moved(20, 0))
        .unwrap();
    assert_eq!(doc.style(west).width, Some(50));
    container
        .handle_event(&mut doc, &PointerEvent::moved(500, 0))
        .unwrap();
    assert_eq!(doc.style(west).width, Some(200));
    assert_eq!(doc.style(center).left, Some(200));
}

#[test]
fn moves_after_release_are_ignored() {
    let mut doc = Document::new();
    let (mut container, west, _) = split_container(&mut doc);
    let splitter = container.splitter_node(Region::West).unwrap();

    container
        .handle_event(&mut doc, &PointerEvent::down(splitter, 100, 0))
        .unwrap();
    container
        .handle_event(&mut doc, &PointerEvent::moved(120, 0))
        .unwrap();
    container
        .handle_event(&mut doc, &PointerEvent::up(120, 0))
        .unwrap();
    let outcome = container
        .handle_event(&mut doc, &PointerEvent::moved(10, 0))
        .unwrap();
    assert_eq!(outcome, EventOutcome::Ignored);
    assert_eq!(doc.style(west).width, Some(120));
}

#[test]
fn drag_survives_rerender() {
    let mut doc = Document::new();
    let (mut container, west, center) = split_container(&mut doc);
    let splitter = container.splitter_node(Region::West).unwrap();
    container
        .handle_event(&mut doc, &PointerEvent::down(splitter, 100, 0))
        .unwrap();

    let north = region_el(&mut doc, "top");
    container
        .add(&mut doc, RegionItem::new(Region::North, north))
        .unwrap();
    assert!(!doc.is_alive(splitter));

    let outcome = container
        .handle_event(&mut doc, &PointerEvent::moved(150, 0))
        .unwrap();
    assert_eq!(outcome, EventOutcome::Consumed);
    assert_eq!(doc.style(west).width, Some(150));
    assert_eq!(doc.style(center).left, Some(150));

    container.render(&mut doc).unwrap();
    container
        .handle_event(&mut doc, &PointerEvent::moved(160, 0))
        .unwrap();
    assert_eq!(
        container
            .handle_event(&mut doc, &PointerEvent::up(160, 0))
            .unwrap(),
        EventOutcome::Consumed
    );
    assert_eq!(doc.style(west).width, Some(160));
    assert_eq!(
        container
            .handle_event(&mut doc, &PointerEvent::moved(10, 0))
            .unwrap(),
        EventOutcome::Ignored
    );
}

#[test]
fn pointer_down_elsewhere_starts_nothing() {
    let mut doc = Document::new();
    let (mut container, west, _) = split_container(&mut doc);
    let outcome = container
        .handle_event(&mut doc, &PointerEvent::down(west, 100, 0))
        .unwrap();
    assert_eq!(outcome, EventOutcome::Ignored);
    assert_eq!(
        container
            .handle_event(&mut doc, &PointerEvent::moved(10, 0))
            .unwrap(),
        EventOutcome::Ignored
    );
}

#[test]
fn drag_start_uses_rendered_size_without_style() {
    let mut doc = Document::new();
    let body = doc.body();
    let north = region_el(&mut doc, "top");
    let center = region_el(&mut doc, "main");
    doc.set_rendered_size(north, Size::new(800, 40)).unwrap();
    let mut container = Container::new(
        &mut doc,
        ContainerConfig::new(body)
            .with_layout(LayoutMode::Border)
            .with_item(RegionItem::new(Region::North, north).split(true))
            .with_item(RegionItem::new(Region::Center, center)),
    )
    .unwrap();
    assert_eq!(doc.style(center).top, Some(40));

    let splitter = container.splitter_node(Region::North).unwrap();
    container
        .handle_event(&mut doc, &PointerEvent::down(splitter, 0, 40))
        .unwrap();
    container
        .handle_event(&mut doc, &PointerEvent::moved(0, 65))
        .unwrap();
    assert_eq!(doc.style(north).height, Some(65));
    assert_eq!(doc.style(center).top, Some(65));
}

#[test]
fn two_splitters_drag_independently() {
    let mut doc = Document::new();
    let body = doc.body();
    let west = region_el(&mut doc, "w");
    let east = region_el(&mut doc, "e");
    let center = region_el(&mut doc, "c");
    let mut container = Container::new(
        &mut doc,
        ContainerConfig::new(body)
            .with_layout(LayoutMode::Border)
            .with_item(RegionItem::new(Region::West, west).split(true))
            .with_item(RegionItem::new(Region::East, east).split(true))
            .with_item(RegionItem::new(Region::Center, center)),
    )
    .unwrap();
    let west_splitter = container.splitter_node(Region::West).unwrap();
    let east_splitter = container.splitter_node(Region::East).unwrap();

    container
        .handle_event(
            &mut doc,
            &PointerEvent::down(west_splitter, 100, 0).with_pointer_id(1),
        )
        .unwrap();
    container
        .handle_event(
            &mut doc,
            &PointerEvent::down(east_splitter, 700, 0).with_pointer_id(2),
        )
        .unwrap();
    container
        .handle_event(&mut doc, &PointerEvent::moved(130, 0).with_pointer_id(1))
        .unwrap();
    container
        .handle_event(&mut doc, &PointerEvent::moved(650, 0).with_pointer_id(2))
        .unwrap();

    assert_eq!(doc.style(west).width, Some(130));
    assert_eq!(doc.style(east).width, Some(150));
    assert_eq!(doc.style(center).left, Some(130));
    assert_eq!(doc.style(center).right, Some(150));
}

#[test]
fn add_twice_keeps_both_entries() {
    let mut doc = Document::new();
    let body = doc.body();
    let mut container = Container::new(&mut doc, ContainerConfig::new(body)).unwrap();
    let button = Button::new(&mut doc, ButtonConfig::new(body, "twice")).unwrap();

    container.add(&mut doc, Item::component(&button)).unwrap();
    let report = container.add(&mut doc, Item::component(&button)).unwrap();

    assert_eq!(container.items().len(), 2);
    assert_eq!(report.mounted, vec![0, 1]);
    let root = container.core().root();
    assert_eq!(doc.children(root), &[button.core().root()]);
}

#[test]
fn set_layout_round_trip_restores_structure() {
    let mut doc = Document::new();
    let body = doc.body();
    let a = region_el(&mut doc, "a");
    let b = region_el(&mut doc, "b");
    let mut container = Container::new(
        &mut doc,
        ContainerConfig::new(body)
            .with_layout(LayoutMode::Hbox)
            .with_item(a)
            .with_item(b),
    )
    .unwrap();
    let root = container.core().root();
    let before = doc.children(root).to_vec();

    container.set_layout(&mut doc, LayoutMode::Fit).unwrap();
    assert!(doc.has_class(root, "layout-fit"));
    assert_eq!(doc.children(root), &[a]);

    container.set_layout(&mut doc, LayoutMode::Hbox).unwrap();
    assert!(doc.has_class(root, "layout-hbox"));
    assert!(!doc.has_class(root, "layout-fit"));
    assert_eq!(doc.children(root), before.as_slice());
}

#[test]
fn border_vbox_border_round_trip_rebuilds_decorations_once() {
    let mut doc = Document::new();
    let body = doc.body();
    let north = region_el(&mut doc, "top");
    let west = region_el(&mut doc, "nav");
    let center = region_el(&mut doc, "main");
    doc.set_rendered_size(north, Size::new(800, 40)).unwrap();
    doc.style_mut(west).unwrap().width = Some(120);
    let mut container = Container::new(
        &mut doc,
        ContainerConfig::new(body)
            .with_layout(LayoutMode::Border)
            .with_item(RegionItem::new(Region::North, north).collapsible(true))
            .with_item(RegionItem::new(Region::West, west).split(true))
            .with_item(RegionItem::new(Region::Center, center)),
    )
    .unwrap();
    let root = container.core().root();
    let first_splitter = container.splitter_node(Region::West).unwrap();
    let offsets = container.border_layout().unwrap().offsets();
    assert_eq!(doc.children(root), &[north, west, first_splitter, center]);

    let report = container.set_layout(&mut doc, LayoutMode::Vbox).unwrap();
    assert!(doc.children(root).is_empty());
    assert!(doc.has_class(root, "layout-vbox"));
    assert!(!doc.has_class(root, "layout-border"));
    assert_eq!(doc.style(root).position, None);
    assert!(container.splitter_node(Region::West).is_none());
    assert!(container.toggle_node(Region::North).is_none());
    assert!(container.border_layout().is_none());
    assert!(doc.query_class(north, COLLAPSE_TOGGLE_CLASS).is_empty());
    assert_eq!(
        report.skipped.iter().map(|s| s.reason).collect::<Vec<_>>(),
        vec![
            SkipReason::RegionOutsideBorder(Region::North),
            SkipReason::RegionOutsideBorder(Region::West),
            SkipReason::RegionOutsideBorder(Region::Center),
        ]
    );

    container.set_layout(&mut doc, LayoutMode::Border).unwrap();
    let splitter = container.splitter_node(Region::West).unwrap();
    assert_ne!(splitter, first_splitter);
    assert!(!doc.is_alive(first_splitter));
    assert_eq!(doc.children(root), &[north, west, splitter, center]);
    assert_eq!(doc.query_class(root, SPLITTER_CLASS), vec![splitter]);
    assert_eq!(doc.query_class(root, COLLAPSE_TOGGLE_CLASS).len(), 1);
    assert_eq!(doc.children(north)[0], container.toggle_node(Region::North).unwrap());
    let region_classes = [
        (north, "region-north"),
        (west, "region-west"),
        (center, "region-center"),
    ];
    for (node, class) in region_classes {
        assert_eq!(doc.classes(node).iter().filter(|c| *c == class).count(), 1);
    }
    assert_eq!(container.border_layout().unwrap().offsets(), offsets);
    assert_eq!(offsets.top, 40);
    assert_eq!(offsets.left, 120);
    assert_eq!(doc.style(center).left, Some(120));
    assert_eq!(doc.style(center).top, Some(40));
}

#[test]
fn registry_dispatch_drives_container_drag() {
    let mut doc = Document::new();
    let body = doc.body();
    let west = region_el(&mut doc, "w");
    let center = region_el(&mut doc, "c");
    let mut registry = ComponentRegistry::with_builtin_types();
    let id = registry
        .create(
            &mut doc,
            &json!({
                "renderTo": body.get(),
                "layout": "border",
                "items": [
                    { "region": "west", "el": west.get(), "split": true,
                      "minWidth": 50, "maxWidth": 200 },
                    { "region": "center", "el": center.get() }
                ]
            }),
            "container",
        )
        .unwrap();
    let splitter = registry
        .get_as::<Container>(&id)
        .and_then(|c| c.splitter_node(Region::West))
        .unwrap();

    registry
        .dispatch(&mut doc, &PointerEvent::down(splitter, 100, 0))
        .unwrap();
    registry
        .dispatch(&mut doc, &PointerEvent::moved(0, 0))
        .unwrap();
    registry
        .dispatch(&mut doc, &PointerEvent::up(0, 0))
        .unwrap();

    assert_eq!(doc.style(west).width, Some(50));
    assert_eq!(doc.style(center).left, Some(50));
}

// ── Render properties ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct RegionSpec {
    region: usize,
    split: bool,
    collapsible: bool,
    collapsed: bool,
}

fn region_spec() -> impl Strategy<Value = RegionSpec> {
    (0usize..5, any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(region, split, collapsible, collapsed)| RegionSpec {
            region,
            split,
            collapsible,
            collapsed,
        },
    )
}

fn build_border(doc: &mut Document, specs: &[RegionSpec]) -> (Container, Vec<RegionItem>) {
    let body = doc.body();
    let items: Vec<RegionItem> = specs
        .iter()
        .map(|spec| {
            let el = doc.create_element("div");
            doc.set_rendered_size(el, Size::new(60, 30)).unwrap();
            RegionItem::new(Region::REFLOW_ORDER[spec.region], el)
                .split(spec.split)
                .collapsible(spec.collapsible)
                .collapsed(spec.collapsed)
        })
        .collect();
    let container = Container::new(
        doc,
        ContainerConfig::new(body)
            .with_layout(LayoutMode::Border)
            .with_items(items.iter().copied().map(Item::from)),
    )
    .unwrap();
    (container, items)
}

/// Root children with splitter handles blanked out, since every render
/// creates fresh handles.
fn shape(doc: &Document, root: NodeId) -> Vec<Option<NodeId>> {
    doc.children(root)
        .iter()
        .map(|&n| (!doc.has_class(n, SPLITTER_CLASS)).then_some(n))
        .collect()
}

proptest! {
    #[test]
    fn render_is_idempotent(specs in proptest::collection::vec(region_spec(), 1..8)) {
        let mut doc = Document::new();
        let (mut container, _) = build_border(&mut doc, &specs);
        let root = container.core().root();
        let first = container.last_report().clone();
        let layout = container.border_layout().cloned();
        let children = shape(&doc, root);
        let toggles = doc.query_class(root, COLLAPSE_TOGGLE_CLASS).len();
        let splitters = doc.query_class(root, SPLITTER_CLASS).len();

        let second = container.render(&mut doc).unwrap();
        prop_assert_eq!(&second, &first);
        prop_assert_eq!(container.border_layout().cloned(), layout);
        prop_assert_eq!(shape(&doc, root), children);
        prop_assert_eq!(doc.query_class(root, COLLAPSE_TOGGLE_CLASS).len(), toggles);
        prop_assert_eq!(doc.query_class(root, SPLITTER_CLASS).len(), splitters);
    }

    #[test]
    fn last_duplicate_region_wins(specs in proptest::collection::vec(region_spec(), 1..8)) {
        let mut doc = Document::new();
        let (container, items) = build_border(&mut doc, &specs);
        for region in Region::REFLOW_ORDER {
            let last = items.iter().rposition(|item| item.region == region);
            prop_assert_eq!(
                container.region(region).map(|item| item.element),
                last.map(|index| items[index].element)
            );
            for (index, item) in items.iter().enumerate() {
                if item.region != region || Some(index) == last {
                    continue;
                }
                let superseded = container.last_report().skipped.iter().any(|s| {
                    s.index == index && s.reason == SkipReason::SupersededRegion(region)
                });
                prop_assert!(superseded);
                prop_assert_eq!(doc.parent(item.element), None);
            }
        }
    }
}
