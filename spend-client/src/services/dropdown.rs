use super::ServiceContext;
use crate::error::ClientResult;
use serde::de::DeserializeOwned;
use shared::models::{Country, Currency, Driver, State};
use shared::paths;

/// Option lists for select inputs
#[derive(Debug, Clone)]
pub struct DropdownService {
    ctx: ServiceContext,
}

impl DropdownService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub async fn countries(&self) -> ClientResult<Vec<Country>> {
        let countries: Vec<Country> = self.fetch(paths::COUNTRIES, Vec::new()).await?;
        self.ctx.store.common.write().await.countries = countries.clone();
        Ok(countries)
    }

    /// States of one country; replaces the previously loaded states
    pub async fn states(&self, country_id: i64) -> ClientResult<Vec<State>> {
        let query = vec![("country_id".to_string(), country_id.to_string())];
        let states: Vec<State> = self.fetch(paths::STATES, query).await?;
        self.ctx.store.common.write().await.states = states.clone();
        Ok(states)
    }

    pub async fn currencies(&self) -> ClientResult<Vec<Currency>> {
        let currencies: Vec<Currency> = self.fetch(paths::CURRENCIES, Vec::new()).await?;
        self.ctx.store.common.write().await.currencies = currencies.clone();
        Ok(currencies)
    }

    pub async fn drivers(&self) -> ClientResult<Vec<Driver>> {
        let drivers: Vec<Driver> = self.fetch(paths::DRIVERS, Vec::new()).await?;
        self.ctx.store.common.write().await.drivers = drivers.clone();
        Ok(drivers)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> ClientResult<Vec<T>> {
        self.ctx
            .api
            .get(path, query, None)
            .await
            .inspect_err(|e| self.ctx.report(e))
    }
}
