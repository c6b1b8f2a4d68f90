//! Cross-Entity Merge
//!
//! Pure joins between containers and items. Nothing here touches a store;
//! the session calls these whenever either side changes.

use std::collections::HashMap;

use crate::domain::{Container, ContainerSnapshot, Item, ItemRef, SearchResult};

/// Lookup from container id to container
pub fn container_index(containers: &[Container]) -> HashMap<&str, &Container> {
    containers.iter().map(|c| (c.id.as_str(), c)).collect()
}

/// Copy every item with `container` resolved from the live containers.
///
/// A dangling `container_id` resolves to `None`; that is an unresolved
/// reference, not an error. Container order does not affect the result.
pub fn resolve_items(containers: &[Container], items: &[Item]) -> Vec<Item> {
    let index = container_index(containers);
    items
        .iter()
        .map(|item| Item {
            container: index.get(item.container_id.as_str()).map(|c| ContainerSnapshot::from(*c)),
            ..item.clone()
        })
        .collect()
}

/// Search rows for the items that carry a resolved container
pub fn search_results(items: &[Item]) -> Vec<SearchResult> {
    items
        .iter()
        .filter_map(|item| {
            item.container.as_ref().map(|container| SearchResult {
                item_name: item.name.clone(),
                container: container.clone(),
            })
        })
        .collect()
}

/// Container with `item` appended to its cached refs (replaced if already cached)
pub fn append_item_ref(container: &Container, item: &Item) -> Container {
    let mut items: Vec<ItemRef> = container.items.iter().filter(|r| r.id != item.id).cloned().collect();
    items.push(ItemRef::from(item));
    Container {
        items,
        ..container.clone()
    }
}

/// Container without the cached ref of `item_id`
pub fn remove_item_ref(container: &Container, item_id: &str) -> Container {
    Container {
        items: container.items.iter().filter(|r| r.id != item_id).cloned().collect(),
        ..container.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_container(id: &str, color: &str) -> Container {
        Container {
            id: id.to_string(),
            name: format!("Container {}", id),
            color: color.to_string(),
            description: format!("About {}", id),
            items: vec![],
        }
    }

    fn make_item(id: &str, container_id: &str) -> Item {
        Item {
            id: id.to_string(),
            name: format!("Item {}", id),
            container_id: container_id.to_string(),
            container: None,
        }
    }

    #[test]
    fn test_dangling_reference_is_unresolved() {
        let containers = vec![make_container("c1", "#0f0")];
        let items = vec![make_item("i1", "c1"), make_item("i2", "zzz")];

        let merged = resolve_items(&containers, &items);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].container.as_ref().map(|c| c.id.as_str()), Some("c1"));
        assert_eq!(merged[0].container.as_ref().map(|c| c.color.as_str()), Some("#0f0"));
        assert!(merged[1].container.is_none());
    }

    #[test]
    fn test_merge_is_deterministic_and_order_independent() {
        let containers = vec![make_container("c1", "#111"), make_container("c2", "#222"), make_container("c3", "#333")];
        let items = vec![make_item("i1", "c3"), make_item("i2", "c1"), make_item("i3", "c2")];

        let first = resolve_items(&containers, &items);
        let second = resolve_items(&containers, &items);
        assert_eq!(first, second);

        let mut permuted = containers.clone();
        permuted.reverse();
        permuted.swap(0, 1);
        assert_eq!(resolve_items(&permuted, &items), first);
    }

    #[test]
    fn test_merge_does_not_mutate_inputs() {
        let containers = vec![make_container("c1", "#111")];
        let items = vec![make_item("i1", "c1")];
        let before = items.clone();

        let _ = resolve_items(&containers, &items);
        assert_eq!(items, before);
    }

    #[test]
    fn test_stale_snapshot_is_refreshed() {
        let mut item = make_item("i1", "c1");
        item.container = Some(ContainerSnapshot::from(&make_container("c1", "#old")));

        let merged = resolve_items(&[make_container("c1", "#new")], &[item]);
        assert_eq!(merged[0].container.as_ref().unwrap().color, "#new");
    }

    #[test]
    fn test_search_results_skip_unresolved() {
        let mut resolved = make_item("i1", "c1");
        resolved.container = Some(ContainerSnapshot::from(&make_container("c1", "#111")));
        let unresolved = make_item("i2", "c2");

        let results = search_results(&[resolved, unresolved]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].item_name, "Item i1");
        assert_eq!(results[0].container.id, "c1");
    }

    #[test]
    fn test_item_ref_cache_maintenance() {
        let container = make_container("c1", "#111");
        let item = make_item("i1", "c1");

        let with_item = append_item_ref(&container, &item);
        assert_eq!(with_item.items, vec![ItemRef { id: "i1".into(), name: "Item i1".into() }]);

        let again = append_item_ref(&with_item, &item);
        assert_eq!(again.items.len(), 1);

        let without = remove_item_ref(&again, "i1");
        assert!(without.items.is_empty());
        assert!(container.items.is_empty());
    }
}
