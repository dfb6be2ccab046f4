use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::client::{ApiClient, ApiError};

/// Page size requested when walking a collection
const PAGE_SIZE: u32 = 200;

/// The operations every remote resource type offers
#[async_trait]
pub trait RemoteClient: Send + Sync {
    type Resource: Serialize + Send + Sync;

    async fn get_specific(&self, id: &str) -> Result<Self::Resource, ApiError>;

    async fn get_all(
        &self,
        sort: Option<&str>,
        query: Option<&str>,
    ) -> Result<RemoteCollection<Self::Resource>, ApiError>;

    async fn create_new(&self, resource: &Self::Resource) -> Result<Self::Resource, ApiError>;

    async fn update(&self, id: &str, resource: &Self::Resource) -> Result<(), ApiError>;
}

/// A resource served under a REST collection path
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection path below the API root, e.g. `/products`
    const PATH: &'static str;
}

/// All items matching a list request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RemoteCollection<R> {
    items: Vec<R>,
}

impl<R> RemoteCollection<R> {
    pub fn new(items: Vec<R>) -> Self {
        Self { items }
    }
}

impl<R> IntoIterator for RemoteCollection<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// One page of a collection as returned by the API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Page<R> {
    #[serde(default)]
    page_index: u32,
    #[serde(default)]
    total_pages: u32,
    #[serde(default = "Vec::new")]
    content: Vec<R>,
}

/// Query parameters for listing a collection
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListParams<'a> {
    page_index: u32,
    page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    q: Option<&'a str>,
}

/// [`RemoteClient`] for any [`Resource`], backed by an [`ApiClient`]
pub struct RestClient<R> {
    client: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> RestClient<R> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    fn item_path(id: &str) -> String {
        format!("{}/{}", R::PATH, id)
    }
}

#[async_trait]
impl<R: Resource> RemoteClient for RestClient<R> {
    type Resource = R;

    async fn get_specific(&self, id: &str) -> Result<R, ApiError> {
        self.client.get(&Self::item_path(id)).await
    }

    async fn get_all(
        &self,
        sort: Option<&str>,
        query: Option<&str>,
    ) -> Result<RemoteCollection<R>, ApiError> {
        let mut items = Vec::new();
        let mut page_index = 0;

        loop {
            let params = ListParams {
                page_index,
                page_size: PAGE_SIZE,
                sort,
                q: query,
            };
            let page: Page<R> = self.client.get_with_query(R::PATH, &params).await?;
            let received = page.content.len();
            items.extend(page.content);

            if received == 0 || page.page_index + 1 >= page.total_pages {
                break;
            }
            page_index = page.page_index + 1;
        }

        Ok(RemoteCollection::new(items))
    }

    async fn create_new(&self, resource: &R) -> Result<R, ApiError> {
        self.client.post(R::PATH, resource).await
    }

    async fn update(&self, id: &str, resource: &R) -> Result<(), ApiError> {
        self.client.put(&Self::item_path(id), resource).await
    }
}
