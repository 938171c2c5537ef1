use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument};

use super::{ProductStore, StoreError};
use crate::domain::{Product, UpdateOutcome};
use async_trait::async_trait;

type Response<T> = oneshot::Sender<Result<T, StoreError>>;

#[derive(Debug)]
enum StoreRequest {
    ListAll {
        respond_to: Response<Vec<Product>>,
    },
    FindById {
        id: String,
        respond_to: Response<Option<Product>>,
    },
    Insert {
        product: Product,
        respond_to: Response<Product>,
    },
    DeleteById {
        id: String,
        respond_to: Response<()>,
    },
    UpdateNameById {
        id: String,
        name: String,
        respond_to: Response<UpdateOutcome>,
    },
    Ping {
        respond_to: Response<()>,
    },
    Shutdown,
}

/// In-process document table owned by a single task.
///
/// Rows are kept in insertion order so listings are stable, mirroring the
/// natural order of a fresh document collection.
pub struct MemoryStoreActor {
    receiver: mpsc::Receiver<StoreRequest>,
    rows: Vec<Product>,
}

impl MemoryStoreActor {
    pub fn new(buffer_size: usize) -> (Self, MemoryProductStore) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            rows: Vec::new(),
        };
        (actor, MemoryProductStore { sender })
    }

    #[instrument(name = "memory_store", skip(self))]
    pub async fn run(mut self) {
        info!("MemoryStore starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::ListAll { respond_to } => {
                    let _ = respond_to.send(Ok(self.rows.clone()));
                }
                StoreRequest::FindById { id, respond_to } => {
                    let row = self.rows.iter().find(|p| p.product_id == id).cloned();
                    let _ = respond_to.send(Ok(row));
                }
                StoreRequest::Insert {
                    product,
                    respond_to,
                } => {
                    self.rows.push(product.clone());
                    let _ = respond_to.send(Ok(product));
                }
                StoreRequest::DeleteById { id, respond_to } => {
                    if let Some(pos) = self.rows.iter().position(|p| p.product_id == id) {
                        self.rows.remove(pos);
                    }
                    let _ = respond_to.send(Ok(()));
                }
                StoreRequest::UpdateNameById {
                    id,
                    name,
                    respond_to,
                } => {
                    let outcome = match self.rows.iter_mut().find(|p| p.product_id == id) {
                        Some(row) => {
                            let modified = row.product_name != name;
                            row.product_name = name;
                            UpdateOutcome {
                                matched_count: 1,
                                modified_count: u64::from(modified),
                            }
                        }
                        None => UpdateOutcome {
                            matched_count: 0,
                            modified_count: 0,
                        },
                    };
                    let _ = respond_to.send(Ok(outcome));
                }
                StoreRequest::Ping { respond_to } => {
                    let _ = respond_to.send(Ok(()));
                }
                StoreRequest::Shutdown => {
                    info!("MemoryStore shutting down");
                    break;
                }
            }
        }

        info!(rows = self.rows.len(), "MemoryStore stopped");
    }
}

/// Handle to a [`MemoryStoreActor`]. Cheap to clone.
#[derive(Clone)]
pub struct MemoryProductStore {
    sender: mpsc::Sender<StoreRequest>,
}

impl MemoryProductStore {
    /// Starts the backing actor on the current runtime and returns its handle.
    pub fn spawn(buffer_size: usize) -> Self {
        let (actor, store) = MemoryStoreActor::new(buffer_size);
        tokio::spawn(actor.run());
        store
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Response<T>) -> StoreRequest,
    ) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::Unavailable("Actor closed".to_string()))?;
        response
            .await
            .map_err(|_| StoreError::Unavailable("Actor dropped".to_string()))?
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        self.request(|respond_to| StoreRequest::ListAll { respond_to })
            .await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, StoreError> {
        let id = id.to_string();
        self.request(|respond_to| StoreRequest::FindById { id, respond_to })
            .await
    }

    async fn insert(&self, product: Product) -> Result<Product, StoreError> {
        self.request(|respond_to| StoreRequest::Insert {
            product,
            respond_to,
        })
        .await
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let id = id.to_string();
        self.request(|respond_to| StoreRequest::DeleteById { id, respond_to })
            .await
    }

    async fn update_name_by_id(&self, id: &str, name: &str) -> Result<UpdateOutcome, StoreError> {
        let id = id.to_string();
        let name = name.to_string();
        self.request(|respond_to| StoreRequest::UpdateNameById {
            id,
            name,
            respond_to,
        })
        .await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.request(|respond_to| StoreRequest::Ping { respond_to })
            .await
    }

    async fn close(&self) -> Result<(), StoreError> {
        debug!("Sending shutdown request");
        // A store that is already gone counts as closed.
        let _ = self.sender.send(StoreRequest::Shutdown).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID_A: &str = "AAAAA-11111-AAAAA-11111-AAAAA-11111";
    const ID_B: &str = "BBBBB-22222-BBBBB-22222-BBBBB-22222";

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let store = MemoryProductStore::spawn(10);
        assert_eq!(store.list_all().await, Ok(vec![]));
        assert_eq!(store.find_by_id(ID_A).await, Ok(None));
    }

    #[tokio::test]
    async fn test_insert_find_and_list_in_order() {
        let store = MemoryProductStore::spawn(10);
        store.insert(Product::new(ID_B, "Second")).await.unwrap();
        store.insert(Product::new(ID_A, "First")).await.unwrap();

        let found = store.find_by_id(ID_A).await.unwrap().unwrap();
        assert_eq!(found.product_name, "First");

        let ids: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.product_id)
            .collect();
        assert_eq!(ids, vec![ID_B.to_string(), ID_A.to_string()]);
    }

    #[tokio::test]
    async fn test_delete_is_silent_for_missing_rows() {
        let store = MemoryProductStore::spawn(10);
        store.insert(Product::new(ID_A, "Widget")).await.unwrap();

        assert_eq!(store.delete_by_id(ID_B).await, Ok(()));
        assert_eq!(store.list_all().await.unwrap().len(), 1);

        assert_eq!(store.delete_by_id(ID_A).await, Ok(()));
        assert_eq!(store.list_all().await, Ok(vec![]));
    }

    #[tokio::test]
    async fn test_update_name_reports_match_count() {
        let store = MemoryProductStore::spawn(10);
        store.insert(Product::new(ID_A, "Widget")).await.unwrap();

        let outcome = store.update_name_by_id(ID_A, "Gadget").await.unwrap();
        assert_eq!(outcome, UpdateOutcome { matched_count: 1, modified_count: 1 });

        let outcome = store.update_name_by_id(ID_A, "Gadget").await.unwrap();
        assert_eq!(outcome, UpdateOutcome { matched_count: 1, modified_count: 0 });

        let outcome = store.update_name_by_id(ID_B, "Gadget").await.unwrap();
        assert_eq!(outcome.matched_count, 0);

        let found = store.find_by_id(ID_A).await.unwrap().unwrap();
        assert_eq!(found.product_name, "Gadget");
    }

    #[tokio::test]
    async fn test_closed_store_is_unavailable() {
        let store = MemoryProductStore::spawn(10);
        assert_eq!(store.ping().await, Ok(()));

        store.close().await.unwrap();
        assert!(matches!(store.ping().await, Err(StoreError::Unavailable(_))));
        assert!(matches!(store.list_all().await, Err(StoreError::Unavailable(_))));
    }
}
