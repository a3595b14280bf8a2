use reqwest::blocking::{Client, Response};
use tracing::debug;
use url::Url;

use super::wire::{ListBody, TaskStarted, TaskStatusBody};
use super::{ClientConfig, PersonApi};
use crate::fetch::PageRequest;
use crate::model::{Cursor, Page, Person, PersonDraft, PersonId, TaskId, TaskStatus};
use crate::query::QueryParams;
use crate::{FolksError, Result};

/// [`PersonApi`] over HTTP with a blocking client
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: Url,
}

impl HttpApi {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: normalize_base(&config.base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// First-page URL for the given filter and ordering
    pub fn list_url(&self, params: &QueryParams) -> Result<Url> {
        let mut url = self.base_url.join("persons/")?;
        url.query_pairs_mut().extend_pairs(params.query_pairs());
        Ok(url)
    }

    /// Cursors are usually absolute; relative ones resolve against the base
    pub fn cursor_url(&self, cursor: &Cursor) -> Result<Url> {
        Ok(self.base_url.join(cursor.as_str())?)
    }

    fn person_url(&self, id: PersonId) -> Result<Url> {
        Ok(self.base_url.join(&format!("persons/{}/", id))?)
    }

    fn page_url(&self, request: &PageRequest) -> Result<Url> {
        match request {
            PageRequest::First(params) => self.list_url(params),
            PageRequest::Cursor(cursor) => self.cursor_url(cursor),
        }
    }
}

fn normalize_base(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    if url.cannot_be_a_base() {
        return Err(FolksError::InvalidUrl(raw.to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Turn non-2xx responses into `FolksError::Status`
fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(FolksError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        })
    }
}

impl PersonApi for HttpApi {
    fn fetch_page(&self, request: &PageRequest) -> Result<Page> {
        let url = self.page_url(request)?;
        debug!(%url, "GET page");
        let body: ListBody = check(self.client.get(url).send()?)?.json()?;
        Ok(body.into())
    }

    fn delete_person(&self, id: PersonId) -> Result<()> {
        let url = self.person_url(id)?;
        debug!(%url, "DELETE person");
        check(self.client.delete(url).send()?)?;
        Ok(())
    }

    fn start_stats(&self) -> Result<TaskId> {
        let url = self.base_url.join("persons/calculate-stats/")?;
        debug!(%url, "POST stats");
        let started: TaskStarted = check(self.client.post(url).send()?)?.json()?;
        Ok(started.task_id)
    }

    fn task_status(&self, task: &TaskId) -> Result<TaskStatus> {
        let url = self.base_url.join(&format!("long-task/{}/", task))?;
        let body: TaskStatusBody = check(self.client.get(url).send()?)?.json()?;
        body.into_status()
    }

    fn create_person(&self, draft: &PersonDraft) -> Result<Person> {
        let url = self.base_url.join("persons/")?;
        debug!(%url, "POST person");
        Ok(check(self.client.post(url).json(draft).send()?)?.json()?)
    }

    fn update_person(&self, id: PersonId, draft: &PersonDraft) -> Result<Person> {
        let url = self.person_url(id)?;
        debug!(%url, "PATCH person");
        Ok(check(self.client.patch(url).json(draft).send()?)?.json()?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::query::{FilterSpec, OrderField};

    fn api(base: &str) -> HttpApi {
        HttpApi::new(&ClientConfig {
            base_url: base.to_string(),
            ..ClientConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        assert_eq!(
            api("http://host:8000/api").base_url().as_str(),
            "http://host:8000/api/"
        );
    }

    #[test]
    fn test_list_url_carries_params() {
        let params = QueryParams::default()
            .with_filter(FilterSpec::new(NaiveDate::from_ymd_opt(2024, 2, 1), None))
            .with_order(OrderField::Age);
        let url = api("http://host/api/").list_url(&params).unwrap();
        assert_eq!(
            url.as_str(),
            "http://host/api/persons/?start_date=2024-02-01&end_date=&ordering=age"
        );
    }

    #[test]
    fn test_cursor_url_is_used_verbatim() {
        let cursor = Cursor("http://other/api/persons/?cursor=xyz".to_string());
        assert_eq!(
            api("http://host/api/").cursor_url(&cursor).unwrap().as_str(),
            "http://other/api/persons/?cursor=xyz"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpApi::new(&ClientConfig {
            base_url: "not a url".to_string(),
            ..ClientConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, FolksError::InvalidUrl(_)));
    }
}
