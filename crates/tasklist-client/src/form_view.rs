//! Form view: turns a submitted `form#task-form` into a new task.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::debug;

use tasklist_store::{COMMENT_KEY, TaskFields};

use crate::collection::{TaskCollection, TaskItem};
use crate::dom::{DomEvent, Element};
use crate::error::TaskClientResult;

/// `id` of the form root element.
pub const TASK_FORM_ID: &str = "task-form";

type CreateListener = Arc<dyn Fn(&TaskItem) + Send + Sync>;

/// Task entry form.
pub struct FormView {
    collection: Arc<TaskCollection>,
    root: Mutex<Element>,
    input: Mutex<String>,
    listeners: Mutex<Vec<CreateListener>>,
}

impl FormView {
    pub fn new(collection: Arc<TaskCollection>) -> Self {
        let root = Element::new("form")
            .with_attr("id", TASK_FORM_ID)
            .with_child(Element::new("textarea").with_attr("name", COMMENT_KEY))
            .with_child(
                Element::new("button")
                    .with_attr("type", "submit")
                    .with_text("Add task"),
            );
        Self {
            collection,
            root: Mutex::new(root),
            input: Mutex::new(String::new()),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Current text of the input field
    pub fn input_value(&self) -> String {
        self.input.lock().clone()
    }

    /// Replace the text of the input field (what a user typing would do).
    pub fn set_input(&self, text: impl Into<String>) {
        let text = text.into();
        if let Some(textarea) = self
            .root
            .lock()
            .child_where_mut(|element| element.tag() == "textarea")
        {
            textarea.set_text(text.clone());
        }
        *self.input.lock() = text;
    }

    /// Register a listener for the "create" event.
    pub fn on_create(&self, listener: impl Fn(&TaskItem) + Send + Sync + 'static) {
        self.listeners.lock().push(Arc::new(listener));
    }

    /// Handle a submit event.
    ///
    /// The new item is added to the collection and announced to "create"
    /// listeners before the server has answered; the returned item carries
    /// the server's record once the create succeeds.
    pub async fn on_submit(&self, event: &mut DomEvent) -> TaskClientResult<TaskItem> {
        let text = self.input_value();
        let mut fields = TaskFields::new();
        fields.insert(COMMENT_KEY.to_string(), Value::String(text));

        let item = self.collection.add_new(fields);
        self.set_input(String::new());

        let listeners: Vec<CreateListener> = self.listeners.lock().clone();
        for listener in listeners {
            listener(&item);
        }
        event.prevent_default();
        debug!("Submitted new task {}", item.cid);

        self.collection.save_new(item.cid).await
    }

    /// Snapshot of the root element
    pub fn element(&self) -> Element {
        self.root.lock().clone()
    }

    pub fn to_html(&self) -> String {
        self.root.lock().to_html()
    }
}
