use futures::future;
use serde_json::{json, Value};

use crate::client::RpcClient;
use crate::model::{Asset, Category, DashboardData, Location, MutationAck, NewAsset};
use crate::notify::{BusyIndicator, Notifier, Severity};
use crate::store::RecordStore;

// wraps every backend call: the busy indicator is held for the duration,
// failures are logged and reported once, and callers only ever see
// Some(payload) or None
pub struct Session {
    client: RpcClient,
    store: RecordStore,
    notifier: Box<dyn Notifier>,
    busy: BusyIndicator,
}

impl Session {
    pub fn new(client: RpcClient, notifier: Box<dyn Notifier>, busy: BusyIndicator) -> Self {
        Self {
            client,
            store: RecordStore::new(),
            notifier,
            busy,
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn client(&self) -> &RpcClient {
        &self.client
    }

    pub fn notify(&self, severity: Severity, message: &str) {
        self.notifier.notify(severity, message);
    }

    pub async fn invoke(&self, function: &str, parameters: Value) -> Option<Value> {
        let guard = self.busy.start(&format!("calling {function}"));
        let result = self.client.call(function, parameters).await;
        drop(guard);
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.busy.println(&format!("call failed: {e}"));
                self.notifier.notify(Severity::Error, "Error connecting to server");
                None
            }
        }
    }

    pub async fn load_assets(&mut self) -> bool {
        match self.invoke("getAssets", json!({})).await {
            Some(value) => self.merge_assets(value),
            None => false,
        }
    }

    pub async fn load_categories(&mut self) -> bool {
        match self.invoke("getCategories", json!({})).await {
            Some(value) => self.merge_categories(value),
            None => false,
        }
    }

    pub async fn load_locations(&mut self) -> bool {
        match self.invoke("getLocations", json!({})).await {
            Some(value) => self.merge_locations(value),
            None => false,
        }
    }

    // reference data loads side by side; each result is merged on its own
    // so one failure never blocks the other
    pub async fn load_initial(&mut self) -> bool {
        let (categories, locations) = future::join(
            self.invoke("getCategories", json!({})),
            self.invoke("getLocations", json!({})),
        )
        .await;

        let categories_ok = match categories {
            Some(value) => self.merge_categories(value),
            None => false,
        };
        let locations_ok = match locations {
            Some(value) => self.merge_locations(value),
            None => false,
        };
        categories_ok && locations_ok
    }

    pub async fn load_dashboard(&self) -> Option<DashboardData> {
        let value = self.invoke("getDashboardData", json!({})).await?;
        match serde_json::from_value::<DashboardData>(value) {
            Ok(data) => Some(data),
            Err(e) => {
                self.busy.println(&format!("unexpected getDashboardData payload: {e}"));
                self.notifier
                    .notify(Severity::Error, "Error loading dashboard data");
                None
            }
        }
    }

    pub async fn create_asset(&mut self, asset: &NewAsset) -> bool {
        let parameters = match serde_json::to_value(asset) {
            Ok(parameters) => parameters,
            Err(e) => {
                self.busy.println(&format!("failed to encode asset: {e}"));
                self.notifier.notify(Severity::Error, "Error creating asset");
                return false;
            }
        };

        if self.mutation_succeeded("createAsset", parameters).await {
            self.notifier
                .notify(Severity::Success, "Asset created successfully!");
            self.load_assets().await;
            self.load_dashboard().await;
            true
        } else {
            self.notifier.notify(Severity::Error, "Error creating asset");
            false
        }
    }

    pub async fn delete_asset(&mut self, id: &str) -> bool {
        if self.mutation_succeeded("deleteAsset", json!({ "id": id })).await {
            self.notifier
                .notify(Severity::Success, "Asset deleted successfully!");
            self.load_assets().await;
            self.load_dashboard().await;
            true
        } else {
            self.notifier.notify(Severity::Error, "Error deleting asset");
            false
        }
    }

    pub async fn generate_report(
        &self,
        kind: &str,
        start_date: &str,
        end_date: &str,
    ) -> Option<Value> {
        let result = self
            .invoke(
                "generateReport",
                json!({
                    "type": kind,
                    "startDate": start_date,
                    "endDate": end_date,
                }),
            )
            .await;
        if result.is_none() {
            self.notifier
                .notify(Severity::Error, "Error generating report");
        }
        result
    }

    pub fn edit_asset(&self, _id: &str) {
        self.notifier
            .notify(Severity::Warning, "Edit functionality not implemented yet");
    }

    pub fn add_category(&self) {
        self.notifier.notify(
            Severity::Warning,
            "Add category functionality not implemented yet",
        );
    }

    pub fn edit_category(&self, _id: &str) {
        self.notifier.notify(
            Severity::Warning,
            "Edit category functionality not implemented yet",
        );
    }

    pub fn delete_category(&self, _id: &str) {
        self.notifier.notify(
            Severity::Warning,
            "Delete category functionality not implemented yet",
        );
    }

    pub fn add_location(&self) {
        self.notifier.notify(
            Severity::Warning,
            "Add location functionality not implemented yet",
        );
    }

    pub fn edit_location(&self, _id: &str) {
        self.notifier.notify(
            Severity::Warning,
            "Edit location functionality not implemented yet",
        );
    }

    pub fn delete_location(&self, _id: &str) {
        self.notifier.notify(
            Severity::Warning,
            "Delete location functionality not implemented yet",
        );
    }

    async fn mutation_succeeded(&self, function: &str, parameters: Value) -> bool {
        self.invoke(function, parameters)
            .await
            .map(|value| serde_json::from_value::<MutationAck>(value).unwrap_or_default())
            .unwrap_or_default()
            .success
    }

    fn merge_assets(&mut self, value: Value) -> bool {
        match serde_json::from_value::<Vec<Asset>>(value) {
            Ok(assets) => {
                self.store.replace_assets(assets);
                true
            }
            Err(e) => {
                self.busy.println(&format!("unexpected getAssets payload: {e}"));
                self.notifier.notify(Severity::Error, "Error loading assets");
                false
            }
        }
    }

    fn merge_categories(&mut self, value: Value) -> bool {
        match serde_json::from_value::<Vec<Category>>(value) {
            Ok(categories) => {
                self.store.replace_categories(categories);
                true
            }
            Err(e) => {
                self.busy.println(&format!("unexpected getCategories payload: {e}"));
                self.notifier
                    .notify(Severity::Error, "Error loading categories");
                false
            }
        }
    }

    fn merge_locations(&mut self, value: Value) -> bool {
        match serde_json::from_value::<Vec<Location>>(value) {
            Ok(locations) => {
                self.store.replace_locations(locations);
                true
            }
            Err(e) => {
                self.busy.println(&format!("unexpected getLocations payload: {e}"));
                self.notifier
                    .notify(Severity::Error, "Error loading locations");
                false
            }
        }
    }
}
