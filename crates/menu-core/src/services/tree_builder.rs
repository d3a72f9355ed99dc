// ============================================================================
// Menu Core - Menu Tree Builder
// File: crates/menu-core/src/services/tree_builder.rs
// ============================================================================
//! Builds the annotated forest for one menu from its flat, ordered item list.
//!
//! Nodes live in an arena addressed by input position; parent/child edges are
//! positions looked up through an id index, so a bad parent chain can never
//! produce an ownership cycle. The owned [`MenuNode`] tree is materialized at
//! the end, taking each arena slot at most once.

use std::collections::HashMap;

use tracing::{debug, warn};

use menu_shared::constants::UNRESOLVED_HREF;

use crate::domain::{Forest, MenuItem, MenuItemId, MenuNode};
use crate::ports::UrlResolver;
use super::url_matcher::{effective_url, matches_current_path};

struct Slot<'a> {
    item: &'a MenuItem,
    href: Option<String>,
    active: bool,
    expanded: bool,
    children: Vec<usize>,
}

impl<'a> Slot<'a> {
    fn new(item: &'a MenuItem) -> Self {
        Self {
            item,
            href: None,
            active: false,
            expanded: false,
            children: Vec::new(),
        }
    }
}

/// Builds the forest for `items` as seen from `current_path`.
///
/// `items` must already be in sibling order; it is never re-sorted. At most
/// one node ends up active: when several items match, the last one wins.
/// The active node, its ancestors and its direct children are expanded.
pub fn build_tree(items: &[MenuItem], current_path: &str, resolver: &dyn UrlResolver) -> Forest {
    // Index pass
    let mut index: HashMap<MenuItemId, usize> = HashMap::with_capacity(items.len());
    for (pos, item) in items.iter().enumerate() {
        index.entry(item.id).or_insert(pos);
    }
    let mut slots: Vec<Option<Slot>> = items.iter().map(|item| Some(Slot::new(item))).collect();

    // Assembly + activation pass
    let mut roots: Vec<usize> = Vec::new();
    let mut active: Option<usize> = None;

    for (pos, item) in items.iter().enumerate() {
        let href = effective_url(item, resolver);
        let is_match = matches_current_path(item, href.as_deref(), current_path, resolver);

        if is_match {
            if let Some(previous) = active.replace(pos) {
                debug!(
                    previous = items[previous].id,
                    current = item.id,
                    "Several menu items match the current path, keeping the last"
                );
                set_flags(&mut slots, previous, |slot| slot.active = false);
            }
        }

        let parent = parent_position(item, &index);
        if let Some(slot) = slots[pos].as_mut() {
            slot.href = href;
            slot.active = is_match;
        }

        match parent {
            Some(parent) => set_flags(&mut slots, parent, |slot| slot.children.push(pos)),
            None => {
                if let Some(parent_id) = item.parent_id {
                    warn!(item_id = item.id, parent_id, "Menu item parent not found, treating as root");
                }
                roots.push(pos);
            }
        }
    }

    // Expansion pass
    if let Some(active) = active {
        expand_around_active(&mut slots, items, &index, active);
    }

    let forest: Forest = roots
        .into_iter()
        .filter_map(|pos| materialize(&mut slots, pos, 0))
        .collect();

    let orphaned = slots.iter().filter(|slot| slot.is_some()).count();
    if orphaned > 0 {
        warn!(orphaned, "Menu items unreachable from any root (parent cycle), skipped");
    }
    debug!(
        items = items.len(),
        roots = forest.len(),
        active = active.map(|pos| items[pos].id),
        "Menu tree built"
    );

    forest
}

fn parent_position(item: &MenuItem, index: &HashMap<MenuItemId, usize>) -> Option<usize> {
    item.parent_id.and_then(|parent_id| index.get(&parent_id).copied())
}

fn set_flags(slots: &mut [Option<Slot>], pos: usize, update: impl FnOnce(&mut Slot)) {
    if let Some(slot) = slots[pos].as_mut() {
        update(slot);
    }
}

/// Expands the direct children of the active node, then walks up through the
/// parent index marking the active node and every ancestor. The walk visits
/// at most `items.len()` nodes so a cyclic chain still terminates.
fn expand_around_active(
    slots: &mut [Option<Slot>],
    items: &[MenuItem],
    index: &HashMap<MenuItemId, usize>,
    active: usize,
) {
    let children = slots[active]
        .as_ref()
        .map(|slot| slot.children.clone())
        .unwrap_or_default();
    for child in children {
        set_flags(slots, child, |slot| slot.expanded = true);
    }

    let mut current = active;
    for _ in 0..items.len() {
        set_flags(slots, current, |slot| slot.expanded = true);
        match parent_position(&items[current], index) {
            Some(parent) => current = parent,
            None => break,
        }
    }
}

fn materialize(slots: &mut [Option<Slot>], pos: usize, level: usize) -> Option<MenuNode> {
    let slot = slots[pos].take()?;
    let children = slot
        .children
        .iter()
        .filter_map(|&child| materialize(slots, child, level + 1))
        .collect();

    Some(MenuNode {
        item: slot.item.clone(),
        href: slot.href.unwrap_or_else(|| UNRESOLVED_HREF.to_string()),
        level,
        active: slot.active,
        expanded: slot.expanded,
        children,
    })
}
