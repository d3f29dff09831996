#![allow(clippy::expect_used, reason = "simplify test failure output")]

use std::path::PathBuf;
use std::sync::Mutex;

use cli_project::fs::{folder_content, remove_path};
use cli_project::{CliProject, FsError, ProjectConfig, with_project};
use cucumber::{World, given, then, when};
use tempfile::TempDir;

#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct StagingWorld {
    tmp: TempDir,
    files: Vec<(String, String)>,
    seen: Vec<String>,
    outcome: Option<Result<(), String>>,
    listing: Vec<String>,
    deletion: Option<Result<(), FsError>>,
}

impl StagingWorld {
    fn new() -> Self {
        Self {
            tmp: TempDir::new().expect("create temp dir"),
            files: Vec::new(),
            seen: Vec::new(),
            outcome: None,
            listing: Vec::new(),
            deletion: None,
        }
    }

    fn root(&self) -> PathBuf {
        self.tmp.path().join("project")
    }
}

#[given(regex = r#"^a project file "(.+)" containing "(.*)"$"#)]
fn project_file(world: &mut StagingWorld, rel: String, contents: String) {
    world.files.push((rel, contents));
}

#[when(regex = r"^the test body (passes|fails)$")]
async fn test_body_runs(world: &mut StagingWorld, outcome: String) {
    let cfg = world.files.iter().fold(
        ProjectConfig::new(world.root(), "cat", ()),
        |cfg, (rel, contents)| cfg.with_file(rel, contents.clone()),
    );
    let rels: Vec<String> = world.files.iter().map(|(rel, _)| rel.clone()).collect();
    let seen = Mutex::new(Vec::new());
    let fail = outcome == "fails";
    let run = with_project(cfg, async |project: &mut CliProject<()>| -> anyhow::Result<()> {
        for rel in &rels {
            let contents = project.read_file(rel).await?;
            seen.lock()
                .expect("seen lock")
                .push(format!("{rel}={contents}"));
        }
        if fail {
            anyhow::bail!("body failed");
        }
        Ok(())
    });
    world.outcome = Some(run().await.map_err(|e| e.to_string()));
    world.seen = seen.into_inner().expect("seen lock");
}

#[then("the body saw every project file")]
fn body_saw_files(world: &mut StagingWorld) {
    let expected: Vec<String> = world
        .files
        .iter()
        .map(|(rel, contents)| format!("{rel}={contents}"))
        .collect();
    assert_eq!(world.seen, expected);
}

#[then("the project directory no longer exists")]
fn project_directory_gone(world: &mut StagingWorld) {
    assert!(!world.root().exists());
}

#[then("the lifecycle succeeded")]
fn lifecycle_succeeded(world: &mut StagingWorld) {
    let outcome = world.outcome.as_ref().expect("lifecycle ran");
    assert_eq!(outcome, &Ok(()));
}

#[then(regex = r#"^the lifecycle reports "(.+)"$"#)]
fn lifecycle_reports(world: &mut StagingWorld, message: String) {
    let outcome = world.outcome.as_ref().expect("lifecycle ran");
    assert_eq!(outcome, &Err(message));
}

#[given(regex = r#"^a folder "(.+)" holding "(.+)"$"#)]
fn folder_holding(world: &mut StagingWorld, folder: String, entries: String) {
    let dir = world.tmp.path().join(folder);
    std::fs::create_dir_all(&dir).expect("create folder");
    for entry in entries.split(',') {
        std::fs::write(dir.join(entry), entry).expect("write entry");
    }
}

#[when(regex = r#"^the folders "(.+)" are listed$"#)]
fn folders_listed(world: &mut StagingWorld, folders: String) {
    let paths: Vec<PathBuf> = folders
        .split(',')
        .map(|f| world.tmp.path().join(f))
        .collect();
    let mut listing: Vec<String> = folder_content(&paths)
        .expect("list folders")
        .iter()
        .map(|p| {
            p.strip_prefix(world.tmp.path())
                .expect("path under temp dir")
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    listing.sort();
    world.listing = listing;
}

#[then(regex = r#"^the listing is "(.*)"$"#)]
fn listing_is(world: &mut StagingWorld, expected: String) {
    let expected: Vec<&str> = expected.split(',').filter(|s| !s.is_empty()).collect();
    assert_eq!(world.listing, expected);
}

#[when(regex = r#"^"(.+)" is deleted twice$"#)]
fn deleted_twice(world: &mut StagingWorld, rel: String) {
    let path = world.tmp.path().join(rel);
    let first = remove_path(&path);
    world.deletion = Some(first.and_then(|()| remove_path(&path)));
}

#[then("deletion succeeded")]
fn deletion_succeeded(world: &mut StagingWorld) {
    let deletion = world.deletion.take().expect("deletion ran");
    assert!(deletion.is_ok(), "deletion failed: {deletion:?}");
}

#[then(regex = r#"^"(.+)" does not exist$"#)]
fn does_not_exist(world: &mut StagingWorld, rel: String) {
    assert!(!world.tmp.path().join(rel).exists());
}
