// Composition tests — the service wired to real stores.
//
// These exercise the whole flow: tokenizer -> corpus -> dictionary ->
// centroids -> ranking, plus training batches, persistence across service
// instances and the article archive. File-backed tests write to the system
// temp dir and clean up after themselves.

use std::path::PathBuf;
use std::sync::Arc;

use rubric::config::Category;
use rubric::db::{ArticleStore, MemoryArticleStore};
use rubric::store::{JsonFileStore, MemoryStore, ModelStore};
use rubric::text::tokenizer::{Language, StemmingTokenizer};
use rubric::{ClassifierError, ClassifierService};

fn categories() -> Vec<Category> {
    vec![
        Category::new("sport", "Спорт"),
        Category::new("tech", "Технологии"),
    ]
}

async fn open(store: Arc<dyn ModelStore>, articles: Arc<dyn ArticleStore>) -> ClassifierService {
    ClassifierService::open(
        store,
        articles,
        Arc::new(StemmingTokenizer::new(Language::Russian)),
        categories(),
    )
    .await
    .unwrap()
}

async fn memory_service() -> (ClassifierService, Arc<MemoryStore>, Arc<MemoryArticleStore>) {
    let store = Arc::new(MemoryStore::new());
    let articles = Arc::new(MemoryArticleStore::new());
    let service = open(store.clone(), articles.clone()).await;
    (service, store, articles)
}

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "rubric_composition_{}_{name}.json",
        std::process::id()
    ))
}

// ============================================================
// Classification scenarios
// ============================================================

#[tokio::test]
async fn nearest_category_is_ranked_first() {
    let (service, _, _) = memory_service().await;
    service.train("sport", &["match goal player"]).await.unwrap();
    service.train("tech", &["server code bug"]).await.unwrap();

    let ranking = service.classify("player match").await.unwrap();
    assert_eq!(ranking.winner().category, "sport");
    let sport = ranking.distance_to("sport").unwrap();
    let tech = ranking.distance_to("tech").unwrap();
    assert!(sport < tech, "sport {sport} should beat tech {tech}");
}

#[tokio::test]
async fn russian_text_is_stemmed_before_matching() {
    let (service, _, _) = memory_service().await;
    service
        .train(
            "sport",
            &[
                "Футболист забил гол в финальном матче",
                "Сборная выиграла матч благодаря вратарю",
            ],
        )
        .await
        .unwrap();
    service
        .train(
            "tech",
            &[
                "Сервер упал из-за ошибки в коде",
                "Новая версия компилятора исправила ошибки",
            ],
        )
        .await
        .unwrap();

    let ranking = service.classify("Гол в матче").await.unwrap();
    assert_eq!(ranking.winner().category, "sport");

    let ranking = service.classify("Ошибка на сервере").await.unwrap();
    assert_eq!(ranking.winner().category, "tech");
}

#[tokio::test]
async fn untrained_category_aborts_classification() {
    let (service, _, _) = memory_service().await;
    service.train("sport", &["ball net goal"]).await.unwrap();

    match service.classify("anything").await {
        Err(ClassifierError::EmptyCategory(c)) => assert_eq!(c, "tech"),
        other => panic!("expected EmptyCategory, got {other:?}"),
    }
}

#[tokio::test]
async fn classify_before_training_reports_missing_model() {
    let (service, _, _) = memory_service().await;
    let err = service.classify("goal").await.unwrap_err();
    assert!(matches!(err, ClassifierError::NoTrainedModel));
    assert!(err.needs_training());
}

#[tokio::test]
async fn classification_never_writes_the_model() {
    let (service, store, _) = memory_service().await;
    service.train("sport", &["goal"]).await.unwrap();
    service.train("tech", &["code"]).await.unwrap();
    let before = store.record().await;

    service.classify("completely novel words").await.unwrap();
    service.classify_article("h", "goal").await.unwrap();

    assert_eq!(store.record().await, before);
    let model = service.model().await.unwrap().unwrap();
    assert_eq!(model.document_count(), 2);
}

// ============================================================
// Persistence
// ============================================================

#[tokio::test]
async fn model_survives_a_restart() {
    let path = scratch_path("restart");
    let _ = std::fs::remove_file(&path);

    let first = open(
        Arc::new(JsonFileStore::new(&path)),
        Arc::new(MemoryArticleStore::new()),
    )
    .await;
    first.train("sport", &["goal"]).await.unwrap();
    first.train("tech", &["server"]).await.unwrap();
    let before = first.classify("goal").await.unwrap();
    first.close().await;

    let second = open(
        Arc::new(JsonFileStore::new(&path)),
        Arc::new(MemoryArticleStore::new()),
    )
    .await;
    let after = second.classify("goal").await.unwrap();

    assert_eq!(after.winner().category, "sport");
    assert_eq!(before, after);

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn corrupt_model_file_is_reported_and_kept() {
    let path = scratch_path("corrupt");
    std::fs::write(&path, r#"{"version": 1, "documents": [}"#).unwrap();

    let result = ClassifierService::open(
        Arc::new(JsonFileStore::new(&path)),
        Arc::new(MemoryArticleStore::new()),
        Arc::new(StemmingTokenizer::default()),
        categories(),
    )
    .await;
    assert!(matches!(result, Err(ClassifierError::CorruptModel(_))));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        r#"{"version": 1, "documents": [}"#
    );

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn classify_sees_writes_from_another_instance() {
    let path = scratch_path("shared");
    let _ = std::fs::remove_file(&path);

    let reader = open(
        Arc::new(JsonFileStore::new(&path)),
        Arc::new(MemoryArticleStore::new()),
    )
    .await;
    let writer = open(
        Arc::new(JsonFileStore::new(&path)),
        Arc::new(MemoryArticleStore::new()),
    )
    .await;

    assert!(matches!(
        reader.classify("goal").await,
        Err(ClassifierError::NoTrainedModel)
    ));

    writer.train("sport", &["goal"]).await.unwrap();
    writer.train("tech", &["code"]).await.unwrap();

    assert_eq!(reader.classify("goal").await.unwrap().winner().category, "sport");
    assert!(reader.model().await.unwrap().is_none());

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn reload_refreshes_the_snapshot() {
    let path = scratch_path("reload");
    let _ = std::fs::remove_file(&path);

    let reader = open(
        Arc::new(JsonFileStore::new(&path)),
        Arc::new(MemoryArticleStore::new()),
    )
    .await;
    let writer = open(
        Arc::new(JsonFileStore::new(&path)),
        Arc::new(MemoryArticleStore::new()),
    )
    .await;
    writer.train("sport", &["goal", "match"]).await.unwrap();

    reader.reload_from_store().await.unwrap();
    let model = reader.model().await.unwrap().unwrap();
    assert_eq!(model.document_count(), 2);

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn single_category_model_survives_a_restart() {
    let path = scratch_path("sport_only");
    let _ = std::fs::remove_file(&path);
    let sport_only = || vec![Category::new("sport", "Спорт")];

    let first = ClassifierService::open(
        Arc::new(JsonFileStore::new(&path)),
        Arc::new(MemoryArticleStore::new()),
        Arc::new(StemmingTokenizer::new(Language::Russian)),
        sport_only(),
    )
    .await
    .unwrap();
    first.train("sport", &["goal"]).await.unwrap();
    let before = first.classify("goal").await.unwrap();
    first.close().await;

    let second = ClassifierService::open(
        Arc::new(JsonFileStore::new(&path)),
        Arc::new(MemoryArticleStore::new()),
        Arc::new(StemmingTokenizer::new(Language::Russian)),
        sport_only(),
    )
    .await
    .unwrap();
    let after = second.classify("goal").await.unwrap();

    assert_eq!(after.len(), 1);
    assert_eq!(after.winner().category, "sport");
    assert_eq!(before, after);

    let _ = std::fs::remove_file(&path);
}

// ============================================================
// Training
// ============================================================

#[tokio::test]
async fn separate_batches_match_one_combined_batch() {
    let (split, _, _) = memory_service().await;
    split.train("sport", &["match goal", "coach"]).await.unwrap();
    split.train("sport", &["stadium goal"]).await.unwrap();
    split.train("tech", &["code bug"]).await.unwrap();

    let (combined, _, _) = memory_service().await;
    combined
        .train("sport", &["match goal", "coach", "stadium goal"])
        .await
        .unwrap();
    combined.train("tech", &["code bug"]).await.unwrap();

    for query in ["goal", "coach bug", "stadium"] {
        assert_eq!(
            split.classify(query).await.unwrap(),
            combined.classify(query).await.unwrap(),
            "{query}"
        );
    }
}

#[tokio::test]
async fn concurrent_training_loses_no_batch() {
    let (service, store, _) = memory_service().await;
    let service = Arc::new(service);

    let mut handles = Vec::new();
    for i in 0..8 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            let category = if i % 2 == 0 { "sport" } else { "tech" };
            let doc = format!("word{i} shared");
            service.train(category, &[doc.as_str(), "extra"]).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stored = store.load().await.unwrap().unwrap();
    assert_eq!(stored.document_count(), 16);
    assert_eq!(stored.documents_with_category("sport").len(), 8);
    assert_eq!(stored.documents_with_category("tech").len(), 8);
}

#[tokio::test]
async fn summary_reports_batch_and_total() {
    let (service, _, _) = memory_service().await;
    let first = service.train("sport", &["goal goal", "match"]).await.unwrap();
    assert_eq!(first.documents_added, 2);
    assert_eq!(first.tokens_added, 3);
    assert_eq!(first.total_documents, 2);

    let second = service.train("tech", &["code"]).await.unwrap();
    assert_eq!(second.total_documents, 3);
}

// ============================================================
// Article archive
// ============================================================

#[tokio::test]
async fn classified_article_is_archived_under_winner() {
    let (service, _, articles) = memory_service().await;
    service.train("sport", &["match goal player"]).await.unwrap();
    service.train("tech", &["server code bug"]).await.unwrap();

    let outcome = service
        .classify_article("Derby report", "late goal wins the match")
        .await
        .unwrap();
    assert_eq!(outcome.ranking.winner().category, "sport");

    let sport = service.articles("sport").await.unwrap();
    assert_eq!(sport.len(), 1);
    assert_eq!(sport[0].id, outcome.article_id);
    assert_eq!(sport[0].header, "Derby report");
    assert!(service.articles("tech").await.unwrap().is_empty());
    assert_eq!(articles.article_count().await.unwrap(), 1);
}

#[tokio::test]
async fn failed_classification_archives_nothing() {
    let (service, _, articles) = memory_service().await;
    service.train("sport", &["goal"]).await.unwrap();

    assert!(service.classify_article("h", "goal").await.is_err());
    assert_eq!(articles.article_count().await.unwrap(), 0);
}
