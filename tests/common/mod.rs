#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::Response;
use http_body_util::BodyExt;
use tempfile::TempDir;

use lorebook::application::ports::{DistanceMetric, Embedder, LlmClient, VectorStore};
use lorebook::application::services::VectorStoreManager;
use lorebook::bootstrap::build_state_with;
use lorebook::infrastructure::llm::{HashedEmbedder, MockLlmClient};
use lorebook::infrastructure::persistence::LocalVectorStore;
use lorebook::presentation::{AppState, Settings, create_router};

pub const TEST_COLLECTION: &str = "test_documents";
pub const TEST_TOP_K: usize = 3;
pub const MOCK_ANSWER: &str = "Solar panels turn sunlight into electricity.";

pub fn test_settings(persist_directory: &TempDir) -> Settings {
    let mut settings = Settings::defaults().expect("default settings must deserialize");
    settings.vector_store.persist_directory = persist_directory.path().display().to_string();
    settings.vector_store.collection_name = TEST_COLLECTION.to_string();
    settings.chunking.chunk_size = 200;
    settings.chunking.chunk_overlap = 20;
    settings.rag.top_k = TEST_TOP_K;
    settings
}

pub fn local_store(dir: &TempDir) -> Arc<LocalVectorStore> {
    Arc::new(LocalVectorStore::new(dir.path(), TEST_COLLECTION))
}

pub fn manager(dir: &TempDir) -> Arc<VectorStoreManager> {
    Arc::new(VectorStoreManager::new(
        Arc::new(HashedEmbedder::default()),
        local_store(dir),
        DistanceMetric::Cosine,
        TEST_TOP_K,
    ))
}

/// Router backed by a temp-dir local store, the hashed embedder and a canned LLM.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub llm: Arc<MockLlmClient>,
    pub dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let settings = test_settings(&dir);
        let llm = Arc::new(MockLlmClient::new(MOCK_ANSWER));

        let embedder: Arc<dyn Embedder> = Arc::new(HashedEmbedder::default());
        let store: Arc<dyn VectorStore> = local_store(&dir);
        let llm_client: Arc<dyn LlmClient> = llm.clone();

        let state = build_state_with(settings, embedder, store, llm_client)
            .expect("state must build from test settings");
        let router = create_router(state.clone());

        Self {
            router,
            state,
            llm,
            dir,
        }
    }
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body must be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body must be JSON")
}

pub fn write_file(dir: &std::path::Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dirs");
    }
    std::fs::write(&path, contents).expect("write fixture");
    path
}

pub fn write_docx(path: &std::path::Path, paragraphs: &[&str]) {
    use docx_rs::{Docx, Paragraph, Run};

    let docx = paragraphs.iter().fold(Docx::new(), |docx, text| {
        docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)))
    });

    let file = std::fs::File::create(path).expect("create docx");
    docx.build().pack(file).expect("pack docx");
}

/// One Helvetica text line per page; an empty string leaves that page blank.
pub fn write_pdf(path: &std::path::Path, pages: &[&str]) {
    use lopdf::content::{Content, Operation};
    use lopdf::{Document, Object, Stream, dictionary};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for text in pages {
        let operations = if text.is_empty() {
            Vec::new()
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode page content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_tree = dictionary! {
        "Type" => "Pages",
        "Count" => pages.len() as i64,
        "Kids" => kids,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(page_tree));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).expect("save pdf");
}

/// A heading paragraph followed by a table with one row per entry of `rows`.
pub fn write_docx_with_table(path: &std::path::Path, heading: &str, rows: &[&[&str]]) {
    use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};

    let cell = |text: &str| {
        TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)))
    };
    let table = Table::new(
        rows.iter()
            .map(|row| TableRow::new(row.iter().map(|text| cell(text)).collect()))
            .collect(),
    );

    let docx = Docx::new()
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text(heading)))
        .add_table(table);

    let file = std::fs::File::create(path).expect("create docx");
    docx.build().pack(file).expect("pack docx");
}
