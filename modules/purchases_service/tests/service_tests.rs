//! Integration tests for the purchases domain service

use chrono::DateTime;
use purchases_service::contract::*;
use purchases_service::domain::Service;
use std::sync::Arc;

mod common;
use common::print_test_header;

// Mock store implementations for testing
pub mod mocks {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::{Mutex, RwLock};
    use purchases_service::domain::{CrudRepository, Resource, Store, UnitOfWork};
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, Default)]
    pub struct MockState {
        pub product_types: BTreeMap<EntityId, ProductType>,
        pub customer_boughts: BTreeMap<EntityId, CustomerBought>,
        pub next_id: EntityId,
    }

    /// Per-entity table access inside the mock state
    pub trait MockTable: Resource {
        fn table(state: &mut MockState) -> &mut BTreeMap<EntityId, Self>;
    }

    impl MockTable for ProductType {
        fn table(state: &mut MockState) -> &mut BTreeMap<EntityId, Self> {
            &mut state.product_types
        }
    }

    impl MockTable for CustomerBought {
        fn table(state: &mut MockState) -> &mut BTreeMap<EntityId, Self> {
            &mut state.customer_boughts
        }
    }

    /// In-memory store; each unit of work edits a private copy of the
    /// state that replaces the shared one on commit.
    #[derive(Clone, Default)]
    pub struct MockStore {
        state: Arc<RwLock<MockState>>,
        /// Simulates a concurrent delete between the existence check and
        /// the fetch of a partial update
        vanish_after_exists: Arc<RwLock<bool>>,
        commits: Arc<RwLock<usize>>,
    }

    impl MockStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn vanish_after_exists(&self, enabled: bool) {
            *self.vanish_after_exists.write() = enabled;
        }

        pub fn product_type_count(&self) -> usize {
            self.state.read().product_types.len()
        }

        pub fn customer_bought(&self, id: EntityId) -> Option<CustomerBought> {
            self.state.read().customer_boughts.get(&id).cloned()
        }

        pub fn commits(&self) -> usize {
            *self.commits.read()
        }
    }

    #[async_trait]
    impl Store for MockStore {
        async fn begin(&self) -> anyhow::Result<Box<dyn UnitOfWork>> {
            Ok(Box::new(MockUnitOfWork {
                staged: Mutex::new(self.state.read().clone()),
                store: self.clone(),
            }))
        }
    }

    pub struct MockUnitOfWork {
        staged: Mutex<MockState>,
        store: MockStore,
    }

    #[async_trait]
    impl UnitOfWork for MockUnitOfWork {
        fn product_types(&self) -> &dyn CrudRepository<ProductType> {
            self
        }

        fn customer_boughts(&self) -> &dyn CrudRepository<CustomerBought> {
            self
        }

        async fn commit(self: Box<Self>) -> anyhow::Result<()> {
            let MockUnitOfWork { staged, store } = *self;
            *store.state.write() = staged.into_inner();
            *store.commits.write() += 1;
            Ok(())
        }
    }

    #[async_trait]
    impl<E> CrudRepository<E> for MockUnitOfWork
    where
        E: MockTable,
        E::Data: Clone,
    {
        async fn insert(&self, data: &E::Data) -> anyhow::Result<E> {
            let mut state = self.staged.lock();
            state.next_id += 1;
            let entity = E::from_data(state.next_id, data.clone());
            E::table(&mut state).insert(entity.id(), entity.clone());
            Ok(entity)
        }

        async fn save(&self, entity: &E) -> anyhow::Result<E> {
            let mut state = self.staged.lock();
            let table = E::table(&mut state);
            if !table.contains_key(&entity.id()) {
                anyhow::bail!("row {} does not exist", entity.id());
            }
            table.insert(entity.id(), entity.clone());
            Ok(entity.clone())
        }

        async fn find_by_id(&self, id: EntityId) -> anyhow::Result<Option<E>> {
            let mut state = self.staged.lock();
            Ok(E::table(&mut state).get(&id).cloned())
        }

        async fn find_all(&self, request: &PageRequest) -> anyhow::Result<Page<E>> {
            let mut state = self.staged.lock();
            let table = E::table(&mut state);
            let mut rows: Vec<E> = table.values().cloned().collect();
            if request
                .sort
                .first()
                .is_some_and(|o| o.property == "id" && o.direction == Direction::Desc)
            {
                rows.reverse();
            }
            let total = rows.len() as u64;
            let items = rows
                .into_iter()
                .skip((request.page * request.size) as usize)
                .take(request.size as usize)
                .collect();
            Ok(Page {
                items,
                page: request.page,
                size: request.size,
                total,
            })
        }

        async fn exists_by_id(&self, id: EntityId) -> anyhow::Result<bool> {
            let mut state = self.staged.lock();
            let table = E::table(&mut state);
            let exists = table.contains_key(&id);
            if exists && *self.store.vanish_after_exists.read() {
                table.remove(&id);
            }
            Ok(exists)
        }

        async fn delete_by_id(&self, id: EntityId) -> anyhow::Result<()> {
            let mut state = self.staged.lock();
            E::table(&mut state).remove(&id);
            Ok(())
        }
    }

    /// Store whose transactions cannot be opened
    pub struct FailingStore;

    #[async_trait]
    impl Store for FailingStore {
        async fn begin(&self) -> anyhow::Result<Box<dyn UnitOfWork>> {
            anyhow::bail!("connection refused")
        }
    }
}

use mocks::{FailingStore, MockStore};

fn service(store: &MockStore) -> Service {
    Service::new(Arc::new(store.clone()))
}

fn rice() -> ProductTypeData {
    ProductTypeData {
        name: "Rice".to_string(),
    }
}

fn purchase(product_type_id: EntityId) -> CustomerBoughtData {
    CustomerBoughtData {
        weight_type: WeightType::Kg,
        unit_price: 40.0,
        total_price: 400.0,
        delivery_date: DateTime::parse_from_rfc3339("2021-07-01T09:30:00+05:30").unwrap(),
        remarks: None,
        status: PaymentStatus::Due,
        total_weight: 10,
        product_type_id,
        customer_id: 1,
    }
}

#[tokio::test]
async fn test_create_assigns_identity() {
    print_test_header(
        "test_create_assigns_identity",
        &["Creating without an id stores the entity with a fresh identity"],
    );
    let store = MockStore::new();
    let service = service(&store);

    let first: ProductType = service.create(None, rice()).await.unwrap();
    let second: ProductType = service
        .create(
            None,
            ProductTypeData {
                name: "Milk".to_string(),
            },
        )
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(first.name, "Rice");
    assert_eq!(store.product_type_count(), 2);
}

#[tokio::test]
async fn test_create_with_identity_is_rejected_without_writing() {
    print_test_header(
        "test_create_with_identity_is_rejected_without_writing",
        &["A body id on create fails with idexists and opens no transaction"],
    );
    let store = MockStore::new();
    let service = service(&store);

    let result = service.create::<ProductType>(Some(7), rice()).await;

    assert_eq!(
        result,
        Err(PurchasesError::IdAlreadySet {
            entity: "productType"
        })
    );
    assert_eq!(result.unwrap_err().error_key(), Some("idexists"));
    assert_eq!(store.product_type_count(), 0);
    assert_eq!(store.commits(), 0);
}

#[tokio::test]
async fn test_update_identity_checks() {
    print_test_header(
        "test_update_identity_checks",
        &[
            "Missing body id -> idnull, different body id -> idinvalid,",
            "unknown id -> idnotfound",
        ],
    );
    let store = MockStore::new();
    let service = service(&store);
    let created: ProductType = service.create(None, rice()).await.unwrap();

    let missing = service.update::<ProductType>(created.id, None, rice()).await;
    assert_eq!(missing.unwrap_err().error_key(), Some("idnull"));

    let mismatch = service
        .update::<ProductType>(created.id, Some(created.id + 1), rice())
        .await;
    assert_eq!(mismatch.unwrap_err().error_key(), Some("idinvalid"));

    let unknown = service.update::<ProductType>(99, Some(99), rice()).await;
    assert_eq!(unknown.unwrap_err().error_key(), Some("idnotfound"));

    let patch_unknown = service
        .partial_update::<ProductType>(99, Some(99), ProductTypePatch::default())
        .await;
    assert_eq!(patch_unknown.unwrap_err().error_key(), Some("idnotfound"));
}

#[tokio::test]
async fn test_update_replaces_all_fields() {
    let store = MockStore::new();
    let service = service(&store);
    let created: ProductType = service.create(None, rice()).await.unwrap();

    let updated: ProductType = service
        .update(
            created.id,
            Some(created.id),
            ProductTypeData {
                name: "Basmati".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Basmati");
    let found: ProductType = service.find_one(created.id).await.unwrap();
    assert_eq!(found, updated);
}

#[tokio::test]
async fn test_partial_update_touches_only_present_fields() {
    print_test_header(
        "test_partial_update_touches_only_present_fields",
        &["Absent patch fields keep their stored values"],
    );
    let store = MockStore::new();
    let service = service(&store);
    let product: ProductType = service.create(None, rice()).await.unwrap();
    let created: CustomerBought = service.create(None, purchase(product.id)).await.unwrap();

    let patched: CustomerBought = service
        .partial_update(
            created.id,
            Some(created.id),
            CustomerBoughtPatch {
                status: Some(PaymentStatus::Paid),
                remarks: Some("settled in cash".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(patched.status, PaymentStatus::Paid);
    assert_eq!(patched.remarks.as_deref(), Some("settled in cash"));
    assert_eq!(patched.unit_price, created.unit_price);
    assert_eq!(patched.total_weight, created.total_weight);
    assert_eq!(patched.delivery_date, created.delivery_date);
    assert_eq!(patched.product_type_id, product.id);
    assert_eq!(store.customer_bought(created.id), Some(patched));
}

#[tokio::test]
async fn test_partial_update_race_answers_not_found() {
    print_test_header(
        "test_partial_update_race_answers_not_found",
        &[
            "Row deleted between existence check and fetch",
            "fails with NotFound and leaves nothing written",
        ],
    );
    let store = MockStore::new();
    let service = service(&store);
    let created: ProductType = service.create(None, rice()).await.unwrap();
    let commits = store.commits();

    store.vanish_after_exists(true);
    let result = service
        .partial_update::<ProductType>(
            created.id,
            Some(created.id),
            ProductTypePatch {
                name: Some("Basmati".to_string()),
            },
        )
        .await;

    assert_eq!(
        result,
        Err(PurchasesError::NotFound {
            entity: "productType",
            id: created.id
        })
    );
    assert_eq!(store.product_type_count(), 1);
    assert_eq!(store.commits(), commits);
}

#[tokio::test]
async fn test_find_one_missing_is_not_found() {
    let store = MockStore::new();
    let result = service(&store).find_one::<CustomerBought>(42).await;
    assert_eq!(
        result,
        Err(PurchasesError::NotFound {
            entity: "customerBought",
            id: 42
        })
    );
}

#[tokio::test]
async fn test_find_all_pages_and_counts() {
    print_test_header(
        "test_find_all_pages_and_counts",
        &["Pages slice the ordered rows and report the full total"],
    );
    let store = MockStore::new();
    let service = service(&store);
    for name in ["Rice", "Milk", "Wheat", "Sugar", "Dal"] {
        let _: ProductType = service
            .create(
                None,
                ProductTypeData {
                    name: name.to_string(),
                },
            )
            .await
            .unwrap();
    }

    let page = service
        .find_all::<ProductType>(&PageRequest::new(1, 2))
        .await
        .unwrap();
    assert_eq!(page.total, 5);
    assert_eq!(page.total_pages(), 3);
    let names: Vec<_> = page.items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Wheat", "Sugar"]);

    let last = service
        .find_all::<ProductType>(&PageRequest::new(2, 2))
        .await
        .unwrap();
    assert_eq!(last.items.len(), 1);
    assert!(!last.has_next());
}

#[tokio::test]
async fn test_find_all_rejects_unknown_sort_property() {
    let store = MockStore::new();
    let request = PageRequest::new(0, 20).with_sort("colour", Direction::Asc);

    match service(&store).find_all::<ProductType>(&request).await {
        Err(PurchasesError::Validation { entity, message }) => {
            assert_eq!(entity, Some("productType"));
            assert!(message.contains("colour"));
        }
        other => panic!("Expected validation error, got {:?}", other),
    }

    let allowed = PageRequest::new(0, 20).with_sort("totalPrice", Direction::Desc);
    assert!(service(&store)
        .find_all::<CustomerBought>(&allowed)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let store = MockStore::new();
    let service = service(&store);
    let created: ProductType = service.create(None, rice()).await.unwrap();

    assert_eq!(service.delete::<ProductType>(created.id).await, Ok(()));
    assert_eq!(service.delete::<ProductType>(created.id).await, Ok(()));
    assert_eq!(store.product_type_count(), 0);
    assert!(service.find_one::<ProductType>(created.id).await.is_err());
}

#[tokio::test]
async fn test_store_failure_is_internal() {
    let service = Service::new(Arc::new(FailingStore));
    let result = service.find_one::<ProductType>(1).await;
    assert_eq!(result, Err(PurchasesError::Internal));
}
