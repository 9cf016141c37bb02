//! Application wiring: collection plus list and form views.

use std::sync::Arc;

use tracing::info;

use tasklist_store::TaskRecord;

use crate::bootstrap::extract_from_page;
use crate::collection::TaskCollection;
use crate::error::TaskClientResult;
use crate::form_view::FormView;
use crate::list_view::ListView;
use crate::transport::{HttpTaskApi, TaskApi};

/// A mounted task application.
pub struct TaskApp {
    pub collection: Arc<TaskCollection>,
    pub list: Arc<ListView>,
    pub form: FormView,
}

impl TaskApp {
    /// Seed a collection from `records`, attach the views and render the list.
    ///
    /// No request is made.
    pub fn mount(api: Arc<dyn TaskApi>, records: Vec<TaskRecord>) -> Self {
        let collection = Arc::new(TaskCollection::new(api));
        collection.seed(records);

        let list = ListView::attach(Arc::clone(&collection));
        list.render();
        let form = FormView::new(Arc::clone(&collection));

        info!("Mounted task app with {} tasks", collection.len());
        Self {
            collection,
            list,
            form,
        }
    }

    /// Load the index page, read its snapshot and mount over `api`.
    pub async fn load(api: HttpTaskApi) -> TaskClientResult<Self> {
        let page = api.index_page().await?;
        let records = extract_from_page(&page)?;
        Ok(Self::mount(Arc::new(api), records))
    }
}
