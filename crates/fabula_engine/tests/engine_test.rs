use async_trait::async_trait;
use fabula_core::{
    CharacterId, CharacterRecordBuilder, CharacterRef, LeafEditBuilder, NodeId, StoryId,
    StoryRecordBuilder, Tier, UserId,
};
use fabula_engine::{
    HierarchyEngine, InMemoryCharacterAccessor, InMemoryNodeStore, InMemoryStoryAccessor,
};
use fabula_error::{FabulaErrorKind, FabulaResult, GeminiError, GeminiErrorKind, GenerationStage};
use fabula_interface::TextGenerator;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted text generator that records every prompt it receives.
#[derive(Clone, Default)]
struct MockGenerator {
    responses: Arc<Mutex<VecDeque<Result<String, String>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockGenerator {
    fn new() -> Self {
        Self::default()
    }

    fn respond_with(&self, text: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(text.to_string()));
    }

    fn fail_with(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn complete(
        &self,
        _credential: &str,
        prompt: &str,
        _timeout: Duration,
    ) -> FabulaResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let scripted = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("generated text".to_string()));
        scripted.map_err(|message| GeminiError::new(GeminiErrorKind::ApiRequest(message)).into())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Generator that never answers; used to exercise the engine deadline.
struct StalledGenerator;

#[async_trait]
impl TextGenerator for StalledGenerator {
    async fn complete(
        &self,
        _credential: &str,
        _prompt: &str,
        _timeout: Duration,
    ) -> FabulaResult<String> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(String::new())
    }

    fn provider_name(&self) -> &'static str {
        "stalled"
    }
}

struct Fixture {
    stories: InMemoryStoryAccessor,
    characters: InMemoryCharacterAccessor,
    nodes: InMemoryNodeStore,
    generator: MockGenerator,
    engine: HierarchyEngine<
        InMemoryStoryAccessor,
        InMemoryCharacterAccessor,
        InMemoryNodeStore,
        MockGenerator,
    >,
}

fn fixture() -> Fixture {
    let stories = InMemoryStoryAccessor::new();
    let characters = InMemoryCharacterAccessor::new();
    let nodes = InMemoryNodeStore::new();
    let generator = MockGenerator::new();
    let engine = HierarchyEngine::new(
        stories.clone(),
        characters.clone(),
        nodes.clone(),
        generator.clone(),
    );
    Fixture {
        stories,
        characters,
        nodes,
        generator,
        engine,
    }
}

async fn add_story(fix: &Fixture, story_id: i64, owner: i64, tier: Tier) {
    fix.stories
        .insert(
            StoryRecordBuilder::default()
                .story_id(StoryId::from(story_id))
                .name("Sample Story")
                .genre("Fantasy")
                .owner(UserId::from(owner))
                .tier(tier)
                .build()
                .unwrap(),
        )
        .await;
}

#[tokio::test]
async fn create_node_persists_a_bare_node() {
    let fix = fixture();
    add_story(&fix, 1, 9, Tier::Standard).await;

    let node_id = fix
        .engine
        .create_node(UserId::from(9), StoryId::from(1), None)
        .await
        .expect("creation failed");

    let node = fix
        .engine
        .get_node(StoryId::from(1), node_id)
        .await
        .expect("fetch failed");
    assert!(node.is_root());
    assert_eq!(node.user_id, Some(UserId::from(9)));
    assert!(node.context.is_empty());
    assert!(node.result.is_empty());
    assert_eq!(fix.nodes.len().await, 1);
}

#[tokio::test]
async fn create_node_hides_foreign_stories() {
    let fix = fixture();
    add_story(&fix, 1, 9, Tier::Standard).await;

    // Non-owner gets the same answer as for a story that does not exist.
    let err = fix
        .engine
        .create_node(UserId::from(8), StoryId::from(1), None)
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), FabulaErrorKind::Story(_)));

    let err = fix
        .engine
        .create_node(UserId::from(9), StoryId::from(404), None)
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), FabulaErrorKind::Story(_)));
}

#[tokio::test]
async fn create_node_accepts_a_dangling_parent() {
    let fix = fixture();
    add_story(&fix, 1, 9, Tier::Standard).await;

    // Parent validation is deferred to generation time.
    let node_id = fix
        .engine
        .create_node(UserId::from(9), StoryId::from(1), Some(NodeId::from(999)))
        .await
        .expect("creation failed");
    let node = fix.engine.get_node(StoryId::from(1), node_id).await.unwrap();
    assert_eq!(node.parent_id, Some(NodeId::from(999)));
}

#[tokio::test]
async fn edit_leaf_overwrites_content_fields() {
    let fix = fixture();
    add_story(&fix, 1, 9, Tier::Standard).await;
    let node_id = fix
        .engine
        .create_node(UserId::from(9), StoryId::from(1), None)
        .await
        .unwrap();

    let edit = LeafEditBuilder::default()
        .node_name("Opening")
        .context("A dragon appears")
        .description("Wide shot of the valley")
        .summary("A dragon has appeared")
        .characters(vec![CharacterRef::new("John", "Doe")])
        .build()
        .unwrap();
    let node = fix
        .engine
        .edit_leaf(StoryId::from(1), node_id, edit)
        .await
        .expect("edit failed");

    assert_eq!(node.node_name, "Opening");
    assert_eq!(node.characters, vec![CharacterRef::new("John", "Doe")]);

    let stored = fix.engine.get_node(StoryId::from(1), node_id).await.unwrap();
    assert_eq!(stored, node);
}

#[tokio::test]
async fn edit_leaf_rejects_nodes_with_children() {
    let fix = fixture();
    add_story(&fix, 1, 9, Tier::Standard).await;
    let parent = fix
        .engine
        .create_node(UserId::from(9), StoryId::from(1), None)
        .await
        .unwrap();
    fix.engine
        .create_node(UserId::from(9), StoryId::from(1), Some(parent))
        .await
        .unwrap();

    let err = fix
        .engine
        .edit_leaf(StoryId::from(1), parent, LeafEditBuilder::default().build().unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), FabulaErrorKind::Node(_)));
    assert!(format!("{}", err).contains("children"));
}

#[tokio::test]
async fn edit_leaf_rejects_story_mismatch() {
    let fix = fixture();
    add_story(&fix, 1, 9, Tier::Standard).await;
    add_story(&fix, 2, 9, Tier::Standard).await;
    let node_id = fix
        .engine
        .create_node(UserId::from(9), StoryId::from(1), None)
        .await
        .unwrap();

    let err = fix
        .engine
        .edit_leaf(StoryId::from(2), node_id, LeafEditBuilder::default().build().unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), FabulaErrorKind::Story(_)));
}

#[tokio::test]
async fn get_node_distinguishes_missing_from_mismatched() {
    let fix = fixture();
    add_story(&fix, 1, 9, Tier::Standard).await;
    let node_id = fix
        .engine
        .create_node(UserId::from(9), StoryId::from(1), None)
        .await
        .unwrap();

    let err = fix
        .engine
        .get_node(StoryId::from(1), NodeId::from(404))
        .await
        .unwrap_err();
    assert!(format!("{}", err).contains("not found"));

    let err = fix.engine.get_node(StoryId::from(2), node_id).await.unwrap_err();
    assert!(format!("{}", err).contains("does not belong"));
}

#[tokio::test]
async fn generate_runs_two_sequential_calls_with_root_framing() {
    let fix = fixture();
    add_story(&fix, 1, 9, Tier::Standard).await;
    fix.generator.respond_with("The dragon lands.");
    fix.generator.respond_with("A dragon has arrived.");

    let beat = fix
        .engine
        .generate("key", StoryId::from(1), None, "A dragon appears", &[])
        .await
        .expect("generation failed");

    assert_eq!(beat.result, "The dragon lands.");
    assert_eq!(beat.summary, "A dragon has arrived.");

    let prompts = fix.generator.prompts();
    assert_eq!(prompts.len(), 2);
    // Continuation prompt: bounded variant, no-prior-plot marker, genre.
    assert!(prompts[0].contains("no more than 500 words"));
    assert!(prompts[0].contains("Plot synopsis: None"));
    assert!(prompts[0].contains("Fantasy"));
    assert!(prompts[0].contains("Expected direction of the plot: \"A dragon appears\""));
    // Summarization prompt feeds on the first call's output.
    assert!(prompts[1].contains("This is the beginning of the whole story"));
    assert!(prompts[1].contains("Part 2: New record\n\"The dragon lands.\""));
}

#[tokio::test]
async fn generate_for_premium_tier_is_unrestricted() {
    let fix = fixture();
    add_story(&fix, 1, 9, Tier::Premium).await;

    fix.engine
        .generate("key", StoryId::from(1), None, "A dragon appears", &[])
        .await
        .expect("generation failed");

    let prompts = fix.generator.prompts();
    assert!(!prompts[0].contains("500"));
}

#[tokio::test]
async fn generate_uses_parent_summary_and_context() {
    let fix = fixture();
    add_story(&fix, 1, 9, Tier::Standard).await;
    let parent = fix
        .engine
        .create_node(UserId::from(9), StoryId::from(1), None)
        .await
        .unwrap();
    fix.engine
        .edit_leaf(
            StoryId::from(1),
            parent,
            LeafEditBuilder::default()
                .context("The kingdom burned")
                .summary("The kingdom fell to ash")
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

    fix.engine
        .generate("key", StoryId::from(1), Some(parent), "Survivors regroup", &[])
        .await
        .expect("generation failed");

    let prompts = fix.generator.prompts();
    assert!(prompts[0].contains("Plot synopsis: \"The kingdom fell to ash\""));
    assert!(prompts[1].contains("\"The kingdom burned\""));
}

#[tokio::test]
async fn generate_treats_dangling_parent_as_root() {
    let fix = fixture();
    add_story(&fix, 1, 9, Tier::Standard).await;
    let parent = fix
        .engine
        .create_node(UserId::from(9), StoryId::from(1), None)
        .await
        .unwrap();
    let child = fix
        .engine
        .create_node(UserId::from(9), StoryId::from(1), Some(parent))
        .await
        .unwrap();
    fix.engine.delete_subtree(child).await.unwrap();

    // The child is gone; generating against it must fall back to root
    // framing instead of erroring.
    let beat = fix
        .engine
        .generate("key", StoryId::from(1), Some(child), "direction", &[])
        .await
        .expect("dangling parent must not fail generation");
    assert!(!beat.result.is_empty());

    let prompts = fix.generator.prompts();
    assert!(prompts[0].contains("Plot synopsis: None"));
    assert!(prompts[1].contains("This is the beginning of the whole story"));
}

#[tokio::test]
async fn generate_resolves_characters_into_the_prompt() {
    let fix = fixture();
    add_story(&fix, 1, 9, Tier::Standard).await;
    fix.characters
        .insert(
            CharacterRecordBuilder::default()
                .character_id(CharacterId::from(1))
                .first_name("John")
                .last_name("Doe")
                .background("A retired detective.")
                .story_id(StoryId::from(1))
                .build()
                .unwrap(),
        )
        .await;

    fix.engine
        .generate(
            "key",
            StoryId::from(1),
            None,
            "direction",
            &[CharacterRef::new("John", "Doe")],
        )
        .await
        .expect("generation failed");

    let prompts = fix.generator.prompts();
    assert!(prompts[0].contains("lastName=Doe, firstName=John, background=A retired detective."));
}

#[tokio::test]
async fn generate_fails_fast_on_unknown_character() {
    let fix = fixture();
    add_story(&fix, 1, 9, Tier::Standard).await;

    let err = fix
        .engine
        .generate(
            "key",
            StoryId::from(1),
            None,
            "direction",
            &[CharacterRef::new("John", "Doe")],
        )
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), FabulaErrorKind::Character(_)));
    let message = format!("{}", err);
    assert!(message.contains("John"));
    assert!(message.contains("Doe"));
    assert!(message.contains("Sample Story"));
    // Fails before any external call is made.
    assert_eq!(fix.generator.call_count(), 0);
}

#[tokio::test]
async fn generate_surfaces_second_stage_failure_without_partial_result() {
    let fix = fixture();
    add_story(&fix, 1, 9, Tier::Standard).await;
    fix.generator.respond_with("The dragon lands.");
    fix.generator.fail_with("connection reset");

    let err = fix
        .engine
        .generate("key", StoryId::from(1), None, "direction", &[])
        .await
        .unwrap_err();

    match err.kind() {
        FabulaErrorKind::Generation(generation) => {
            assert_eq!(generation.kind.stage(), GenerationStage::Summarization);
        }
        other => panic!("expected generation error, got {other:?}"),
    }
    // Both calls were made; the continuation output was discarded.
    assert_eq!(fix.generator.call_count(), 2);
}

#[tokio::test]
async fn generate_surfaces_first_stage_failure() {
    let fix = fixture();
    add_story(&fix, 1, 9, Tier::Standard).await;
    fix.generator.fail_with("quota exceeded");

    let err = fix
        .engine
        .generate("key", StoryId::from(1), None, "direction", &[])
        .await
        .unwrap_err();

    match err.kind() {
        FabulaErrorKind::Generation(generation) => {
            assert_eq!(generation.kind.stage(), GenerationStage::Continuation);
            assert!(format!("{}", generation).contains("quota exceeded"));
        }
        other => panic!("expected generation error, got {other:?}"),
    }
    assert_eq!(fix.generator.call_count(), 1);
}

#[tokio::test]
async fn generate_times_out_like_any_other_failure() {
    let stories = InMemoryStoryAccessor::new();
    stories
        .insert(
            StoryRecordBuilder::default()
                .story_id(StoryId::from(1))
                .name("Sample Story")
                .genre("Fantasy")
                .owner(UserId::from(9))
                .build()
                .unwrap(),
        )
        .await;
    let engine = HierarchyEngine::new(
        stories,
        InMemoryCharacterAccessor::new(),
        InMemoryNodeStore::new(),
        StalledGenerator,
    )
    .with_completion_timeout(Duration::from_millis(20));

    let err = engine
        .generate("key", StoryId::from(1), None, "direction", &[])
        .await
        .unwrap_err();

    match err.kind() {
        FabulaErrorKind::Generation(generation) => {
            assert_eq!(generation.kind.stage(), GenerationStage::Continuation);
            assert!(format!("{}", generation).contains("timed out"));
        }
        other => panic!("expected generation error, got {other:?}"),
    }
}

#[tokio::test]
async fn character_background_uses_one_call() {
    let fix = fixture();
    add_story(&fix, 1, 9, Tier::Standard).await;
    fix.generator.respond_with("A retired detective with a grudge.");

    let background = fix
        .engine
        .generate_character_background("key", StoryId::from(1), "John", "Doe")
        .await
        .expect("background generation failed");

    assert_eq!(background, "A retired detective with a grudge.");
    let prompts = fix.generator.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("background for John Doe"));
    assert!(prompts[0].contains("no more than 50 words"));
}
