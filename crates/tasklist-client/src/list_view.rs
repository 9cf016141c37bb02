//! List view: one `li` per task under `ul#task-list`.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::collection::{ClientId, CollectionObserver, TaskCollection, TaskItem};
use crate::dom::{DomEvent, Element, NodePath};
use crate::error::{TaskClientError, TaskClientResult};

/// `id` of the list root element.
pub const TASK_LIST_ID: &str = "task-list";

const ITEM_ID_ATTR: &str = "data-id";
const DELETE_CLASS: &str = "delete";

/// Keeps `ul#task-list` in step with a `TaskCollection`.
pub struct ListView {
    collection: Arc<TaskCollection>,
    root: Mutex<Element>,
}

impl ListView {
    /// Create the view and subscribe it to `collection`.
    ///
    /// Items already in the collection are not drawn until `render`.
    pub fn attach(collection: Arc<TaskCollection>) -> Arc<Self> {
        let view = Arc::new(Self {
            collection: Arc::clone(&collection),
            root: Mutex::new(Element::new("ul").with_attr("id", TASK_LIST_ID)),
        });
        collection.subscribe(&view);
        view
    }

    /// Append one element per item currently in the collection.
    pub fn render(&self) {
        let items = self.collection.items();
        let mut root = self.root.lock();
        for item in &items {
            root.append_child(item_element(item));
        }
        debug!("Rendered {} task elements", items.len());
    }

    /// Handle a click on a delete control.
    ///
    /// Only clicks on a `button.delete` count; the `li` holding it names the
    /// item to destroy. The default action is prevented once the item is
    /// resolved.
    pub async fn on_delete_click(&self, event: &mut DomEvent) -> TaskClientResult<()> {
        let cid = self.item_at(event.target())?;
        event.prevent_default();
        self.collection.destroy(cid).await
    }

    fn item_at(&self, target: &[usize]) -> TaskClientResult<ClientId> {
        let root = self.root.lock();
        let on_delete_control = root.at_path(target).is_some_and(|element| {
            element.tag() == "button" && element.has_class(DELETE_CLASS)
        });
        if !on_delete_control {
            return Err(TaskClientError::UnknownItem(format!(
                "no delete control at {:?}",
                target
            )));
        }

        let cid = (0..target.len())
            .rev()
            .filter_map(|depth| root.at_path(&target[..depth]))
            .find(|element| element.tag() == "li")
            .and_then(|li| li.attr(ITEM_ID_ATTR))
            .ok_or_else(|| {
                TaskClientError::UnknownItem(format!("no task element at {:?}", target))
            })?
            .parse()?;
        Ok(cid)
    }

    /// Path of the delete button for `cid`, for building click events.
    pub fn delete_button_path(&self, cid: ClientId) -> Option<NodePath> {
        let cid = cid.to_string();
        let root = self.root.lock();
        let item_path = root.path_of(&|element| {
            element.tag() == "li" && element.attr(ITEM_ID_ATTR) == Some(cid.as_str())
        })?;
        let button_path = root.at_path(&item_path)?.path_of(&|element| {
            element.tag() == "button" && element.has_class(DELETE_CLASS)
        })?;
        Some(item_path.into_iter().chain(button_path).collect())
    }

    /// Snapshot of the root element
    pub fn element(&self) -> Element {
        self.root.lock().clone()
    }

    pub fn to_html(&self) -> String {
        self.root.lock().to_html()
    }

    /// Number of rendered task elements
    pub fn item_count(&self) -> usize {
        self.root
            .lock()
            .child_elements()
            .filter(|element| element.tag() == "li")
            .count()
    }
}

impl CollectionObserver for ListView {
    fn on_added(&self, item: &TaskItem) {
        self.root.lock().append_child(item_element(item));
    }

    fn on_removed(&self, item: &TaskItem) {
        let cid = item.cid.to_string();
        self.root
            .lock()
            .remove_child_where(|element| element.attr(ITEM_ID_ATTR) == Some(cid.as_str()));
    }

    fn on_changed(&self, item: &TaskItem) {
        let cid = item.cid.to_string();
        let mut root = self.root.lock();
        let span = root
            .child_where_mut(|element| element.attr(ITEM_ID_ATTR) == Some(cid.as_str()))
            .and_then(|li| li.child_where_mut(|element| element.tag() == "span"));
        if let Some(span) = span {
            span.set_text(item.comment_text());
        }
    }
}

fn item_element(item: &TaskItem) -> Element {
    Element::new("li")
        .with_attr(ITEM_ID_ATTR, item.cid.to_string())
        .with_child(Element::new("span").with_text(item.comment_text()))
        .with_child(
            Element::new("button")
                .with_attr("class", DELETE_CLASS)
                .with_text("Delete"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Node;
    use crate::test_support::{MockTaskApi, fields, record};
    use serde_json::json;

    fn seeded(records: Vec<tasklist_store::TaskRecord>) -> (Arc<MockTaskApi>, Arc<TaskCollection>) {
        let api = Arc::new(MockTaskApi::with_records(records.clone()));
        let collection = Arc::new(TaskCollection::new(api.clone()));
        collection.seed(records);
        (api, collection)
    }

    #[test]
    fn test_render_draws_seeded_items_without_requests() {
        let (api, collection) = seeded(vec![record(1, "a"), record(2, "b"), record(3, "c")]);
        let view = ListView::attach(collection);
        assert_eq!(view.item_count(), 0);

        view.render();

        assert_eq!(view.item_count(), 3);
        assert_eq!(api.request_count(), 0);
        assert_eq!(
            view.to_html(),
            concat!(
                r#"<ul id="task-list">"#,
                r#"<li data-id="c1"><span>a</span><button class="delete">Delete</button></li>"#,
                r#"<li data-id="c2"><span>b</span><button class="delete">Delete</button></li>"#,
                r#"<li data-id="c3"><span>c</span><button class="delete">Delete</button></li>"#,
                "</ul>"
            )
        );
    }

    #[tokio::test]
    async fn test_added_items_are_appended_escaped() {
        let (_, collection) = seeded(vec![]);
        let view = ListView::attach(Arc::clone(&collection));

        collection
            .create(fields(json!({"comment": "<img src=x onerror=alert(1)>"})))
            .await
            .unwrap();

        let html = view.to_html();
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(!html.contains("<img"));
        let li = view.element().child_elements().next().cloned().unwrap();
        assert_eq!(li.attr("data-id"), Some("c1"));
        assert!(matches!(li.children()[0], Node::Element(ref span) if span.tag() == "span"));
    }

    #[tokio::test]
    async fn test_delete_click_destroys_item() {
        let (api, collection) = seeded(vec![record(1, "a"), record(2, "b")]);
        let view = ListView::attach(Arc::clone(&collection));
        view.render();

        let cid = collection.get_by_id(1).unwrap().cid;
        let mut event = DomEvent::click(view.delete_button_path(cid).unwrap());
        view.on_delete_click(&mut event).await.unwrap();

        assert!(event.is_default_prevented());
        assert_eq!(api.deleted(), vec![1]);
        assert_eq!(collection.len(), 1);
        assert_eq!(view.item_count(), 1);
        assert!(view.delete_button_path(cid).is_none());
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_element() {
        let (api, collection) = seeded(vec![record(1, "a")]);
        let view = ListView::attach(Arc::clone(&collection));
        view.render();
        api.fail_next();

        let cid = collection.items()[0].cid;
        let mut event = DomEvent::click(view.delete_button_path(cid).unwrap());
        assert!(view.on_delete_click(&mut event).await.is_err());
        assert_eq!(view.item_count(), 1);
    }

    #[tokio::test]
    async fn test_click_outside_items_is_ignored() {
        let (api, collection) = seeded(vec![record(1, "a")]);
        let view = ListView::attach(collection);
        view.render();

        let mut event = DomEvent::click(vec![]);
        let err = view.on_delete_click(&mut event).await.unwrap_err();
        assert!(matches!(err, TaskClientError::UnknownItem(_)));
        assert!(!event.is_default_prevented());
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn test_click_on_comment_does_not_delete() {
        let (api, collection) = seeded(vec![record(1, "a")]);
        let view = ListView::attach(Arc::clone(&collection));
        view.render();

        // [0, 0] is the comment span of the first item
        let mut event = DomEvent::click(vec![0, 0]);
        let err = view.on_delete_click(&mut event).await.unwrap_err();

        assert!(matches!(err, TaskClientError::UnknownItem(_)));
        assert!(!event.is_default_prevented());
        assert_eq!(api.request_count(), 0);
        assert!(api.deleted().is_empty());
        assert_eq!(collection.len(), 1);
        assert_eq!(view.item_count(), 1);

        let mut event = DomEvent::click(vec![0]);
        assert!(view.on_delete_click(&mut event).await.is_err());
        assert_eq!(collection.len(), 1);
    }

    #[tokio::test]
    async fn test_non_string_comment_is_shown_as_json() {
        let (_, collection) = seeded(vec![]);
        let view = ListView::attach(Arc::clone(&collection));

        let item = collection
            .create(fields(json!({"comment": 42})))
            .await
            .unwrap();
        assert!(view.to_html().contains("<span>42</span>"));

        collection
            .update(item.cid, fields(json!({"comment": {"text": "x"}})))
            .await
            .unwrap();
        assert!(view.to_html().contains("<span>{&quot;text&quot;:&quot;x&quot;}</span>"));
    }

    #[tokio::test]
    async fn test_changed_items_are_redrawn() {
        let (_, collection) = seeded(vec![record(1, "old")]);
        let view = ListView::attach(Arc::clone(&collection));
        view.render();

        let cid = collection.items()[0].cid;
        collection
            .update(cid, fields(json!({"comment": "new"})))
            .await
            .unwrap();

        assert!(view.to_html().contains("<span>new</span>"));
    }

    #[tokio::test]
    async fn test_fetch_updates_elements() {
        let (api, collection) = seeded(vec![record(1, "a"), record(2, "b")]);
        let view = ListView::attach(Arc::clone(&collection));
        view.render();

        api.set_records(vec![record(2, "b"), record(5, "e")]);
        collection.fetch().await.unwrap();

        let ids: Vec<String> = view
            .element()
            .child_elements()
            .filter_map(|li| li.attr("data-id").map(str::to_string))
            .collect();
        assert_eq!(ids, vec!["c2", "c3"]);
    }
}
