//! The `compile` subcommand: walk a content directory, discover items, and
//! push each through the serialization gate.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use jwalk::WalkDir;

use crate::cli::args::CompileArgs;
use crate::compiler::CompileContext;
use crate::config::ForgeConfig;
use crate::content::ContentFile;
use crate::queue::CompileQueue;
use crate::{log, logger};

pub async fn run_compile(args: &CompileArgs, config: ForgeConfig) -> Result<()> {
    logger::set_verbose(args.verbose);

    let files = read_content_dir(&args.dir)?;
    if files.is_empty() {
        bail!("no files under {}", args.dir.display());
    }

    // (slug, item directory) pairs. With --slug the whole file set is handed
    // to the compiler, which locates the entry itself.
    let items = match &args.slug {
        Some(slug) => vec![(slug.clone(), None)],
        None => discover_items(&files)
            .into_iter()
            .map(|(slug, dir)| (slug, Some(dir)))
            .collect(),
    };
    if items.is_empty() {
        bail!(
            "no content items (<slug>/index.md or index.mdx) under {}",
            args.dir.display()
        );
    }

    let budget = config.queue.timeout();
    let ctx = Arc::new(CompileContext::new(config)?);
    let queue = CompileQueue::global(budget);

    let mut artifacts = serde_json::Map::new();
    for (slug, dir) in items {
        let item_files: Vec<ContentFile> = match &dir {
            Some(dir) => {
                let prefix = format!("{dir}/");
                files
                    .iter()
                    .filter(|file| file.path.starts_with(&prefix))
                    .cloned()
                    .collect()
            }
            None => files.clone(),
        };

        match queue.submit(&slug, item_files, Arc::clone(&ctx)).await? {
            Some(artifact) => {
                log!("compile"; "compiled '{slug}' ({})", artifact.read_time.text);
                artifacts.insert(slug, serde_json::to_value(artifact)?);
            }
            None => log!("warn"; "no entry document for '{slug}', skipped"),
        }
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&artifacts)?
    } else {
        serde_json::to_string(&artifacts)?
    };
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("writing {}", path.display()))?;
            log!("compile"; "wrote {} artifact(s) to {}", artifacts.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Walk `dir` and load every file, with paths relative to `dir` and
/// normalized to forward slashes. Non-UTF-8 content is loaded lossily; the
/// file map only needs bytes-as-text fidelity for text assets.
fn read_content_dir(dir: &Path) -> Result<Vec<ContentFile>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort(true) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let relative = path
            .strip_prefix(dir)
            .with_context(|| format!("walking {}", dir.display()))?
            .to_string_lossy()
            .replace('\\', "/");
        let bytes = std::fs::read(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        files.push(ContentFile::new(relative, String::from_utf8_lossy(&bytes)));
    }
    Ok(files)
}

/// Every directory holding an `index.md(x)` is one content item; its name is
/// the slug. First occurrence wins on duplicate slugs.
fn discover_items(files: &[ContentFile]) -> Vec<(String, String)> {
    let mut items: Vec<(String, String)> = Vec::new();
    for file in files {
        let Some((dir, name)) = file.path.rsplit_once('/') else {
            continue;
        };
        if name != "index.md" && name != "index.mdx" {
            continue;
        }
        let slug = dir.rsplit('/').next().unwrap_or(dir).to_string();
        if !items.iter().any(|(existing, _)| existing == &slug) {
            items.push((slug, dir.to_string()));
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn seed(root: &Path) {
        fs::create_dir_all(root.join("blog/first-post")).unwrap();
        fs::create_dir_all(root.join("blog/second-post")).unwrap();
        fs::write(
            root.join("blog/first-post/index.mdx"),
            "---\ntitle: First\n---\n\nhello world",
        )
        .unwrap();
        fs::write(root.join("blog/first-post/notes.md"), "extra").unwrap();
        fs::write(
            root.join("blog/second-post/index.md"),
            "---\ntitle: Second\n---\n\nmore words here",
        )
        .unwrap();
    }

    #[test]
    fn test_walk_and_discover() {
        let tmp = tempfile::tempdir().unwrap();
        seed(tmp.path());

        let files = read_content_dir(tmp.path()).unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.iter().any(|f| f.path == "blog/first-post/index.mdx"));

        let items = discover_items(&files);
        assert_eq!(items.len(), 2);
        assert!(items.contains(&("first-post".into(), "blog/first-post".into())));
        assert!(items.contains(&("second-post".into(), "blog/second-post".into())));
    }

    #[tokio::test]
    async fn test_compile_dir_to_json_file() {
        let tmp = tempfile::tempdir().unwrap();
        seed(tmp.path());
        let out = tmp.path().join("out.json");

        let args = CompileArgs {
            dir: tmp.path().to_path_buf(),
            slug: None,
            output: Some(out.clone()),
            pretty: false,
            verbose: false,
        };
        run_compile(&args, ForgeConfig::default()).await.unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(json["first-post"]["frontmatter"]["title"], "First");
        assert_eq!(json["second-post"]["read_time"]["words"], 3);
    }

    #[tokio::test]
    async fn test_single_slug_compile() {
        let tmp = tempfile::tempdir().unwrap();
        seed(tmp.path());
        let out = tmp.path().join("one.json");

        let args = CompileArgs {
            dir: tmp.path().to_path_buf(),
            slug: Some("first-post".into()),
            output: Some(out.clone()),
            pretty: true,
            verbose: false,
        };
        run_compile(&args, ForgeConfig::default()).await.unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert!(json.get("first-post").is_some());
        assert!(json.get("second-post").is_none());
    }
}
