use anyhow::Result;
use auto_catalog::{
    CarFilter, CatalogError, CatalogService, EnrichmentPool, HttpCarInfoClient,
    InMemoryCarRepository, TomlConfig,
};
use httpmock::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn car_body(reg_num: &str, mark: &str, year: f64) -> serde_json::Value {
    serde_json::json!({
        "regNum": reg_num,
        "mark": mark,
        "model": "Vesta",
        "year": year,
        "owner": {
            "name": "Ivan",
            "surname": "Petrov",
            "patronymic": "Sergeevich"
        }
    })
}

#[tokio::test]
async fn test_end_to_end_create_keeps_input_order() -> Result<()> {
    let server = MockServer::start();

    let first = server.mock(|when, then| {
        when.method(GET).path("/info").query_param("regNum", "AA1111");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(car_body("AA1111", "Lada", 2018.0));
    });
    let second = server.mock(|when, then| {
        when.method(GET).path("/info").query_param("regNum", "BB2222");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(car_body("BB2222", "Kia", 2021.0));
    });

    let client = HttpCarInfoClient::new(server.url("/info"));
    let pool = EnrichmentPool::new(client, 1, 10)?;
    let service = CatalogService::new(pool, InMemoryCarRepository::new());

    let created = service
        .create(&["AA1111".to_string(), "BB2222".to_string()])
        .await?;

    first.assert();
    second.assert();
    assert_eq!(created[0].reg_num, "AA1111");
    assert_eq!(created[1].reg_num, "BB2222");
    assert_eq!(created[1].year, 2021);

    let kias = service
        .list(&CarFilter {
            mark: Some("Kia".to_string()),
            ..Default::default()
        })
        .await?;
    assert_eq!(kias.len(), 1);
    assert_eq!(kias[0].reg_num, "BB2222");

    Ok(())
}

#[tokio::test]
async fn test_missing_owner_is_malformed() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/info").query_param("regNum", "CC3333");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "regNum": "CC3333",
                "mark": "Lada",
                "model": "Niva",
                "year": 2005
            }));
    });

    let pool = EnrichmentPool::new(HttpCarInfoClient::new(server.url("/info")), 2, 20)?;
    let result = pool.enrich(&["CC3333".to_string()]).await;

    api_mock.assert();
    assert!(matches!(result, Err(CatalogError::MalformedResponse { .. })));
    Ok(())
}

#[tokio::test]
async fn test_remote_failure_aborts_batch_and_stores_nothing() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/info").query_param("regNum", "AA1111");
        then.status(200).json_body(car_body("AA1111", "Lada", 2018.0));
    });
    server.mock(|when, then| {
        when.method(GET).path("/info").query_param("regNum", "DD4444");
        then.status(500);
    });

    let pool = EnrichmentPool::new(HttpCarInfoClient::new(server.url("/info")), 2, 20)?;
    let service = CatalogService::new(pool, InMemoryCarRepository::new());

    let result = service
        .create(&["AA1111".to_string(), "DD4444".to_string()])
        .await;

    match result {
        Err(CatalogError::RemoteRejection { reg_num, status }) => {
            assert_eq!(reg_num, "DD4444");
            assert_eq!(status, 500);
        }
        other => panic!("expected rejection, got {:?}", other),
    }
    assert!(service.list(&CarFilter::default()).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_empty_batch_issues_no_requests() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/info");
        then.status(200).json_body(car_body("AA1111", "Lada", 2018.0));
    });

    let pool = EnrichmentPool::new(HttpCarInfoClient::new(server.url("/info")), 3, 30)?;
    let cars = pool.enrich(&[]).await?;

    assert!(cars.is_empty());
    api_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_pool_built_from_toml_config() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/info");
        then.status(200).json_body(car_body("EE5555", "Lada", 2010.0));
    });

    let mut config_file = NamedTempFile::new()?;
    write!(
        config_file,
        "[lookup]\nurl = \"{}\"\ntimeout_seconds = 5\n\n[pool]\nmax_workers = 2\n",
        server.url("/info")
    )?;
    let config = TomlConfig::from_file(config_file.path())?;

    let client = HttpCarInfoClient::from_config(&config)?;
    let pool = EnrichmentPool::from_config(client, &config)?;
    assert_eq!(pool.pool_size(), 2);
    assert_eq!(pool.queue_capacity(), 20);

    let cars = pool.enrich(&["EE5555".to_string()]).await?;
    api_mock.assert();
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0].year, 2010);
    Ok(())
}
