use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// One game on the shelf. Never mutated after the catalog is built.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub play_url: String,
    #[serde(default)]
    pub screenshots: Vec<String>,
    /// Informational only; the launcher never branches on it.
    #[serde(default)]
    pub web_ready: bool,
}

impl GameRecord {
    /// Image for the detail view: the thumbnail, else the first screenshot.
    pub fn preview_image(&self) -> Option<&str> {
        self.thumbnail
            .as_deref()
            .or_else(|| self.screenshots.first().map(String::as_str))
    }
}

struct BuiltinGame {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    thumbnail: Option<&'static str>,
    play_url: &'static str,
    screenshots: &'static [&'static str],
    web_ready: bool,
}

const BUILTIN_GAMES: [BuiltinGame; 8] = [
    BuiltinGame { id: "aeroblasters", title: "Aeroblasters", description: "# Aeroblasters", thumbnail: Some("game-assets/aeroblasters/app.png"), play_url: "game-players/aeroblasters.html", screenshots: &["game-assets/aeroblasters/app.png"], web_ready: true },
    BuiltinGame { id: "arc-dash", title: "Arc Dash", description: "# Arc Dash", thumbnail: None, play_url: "game-players/arc-dash.html", screenshots: &[], web_ready: true },
    BuiltinGame { id: "car-racing-2d", title: "Car Racing 2d", description: "# Car Dodge 2D", thumbnail: Some("game-assets/car-racing-2d/app.png"), play_url: "game-players/car-racing-2d.html", screenshots: &["game-assets/car-racing-2d/app.png"], web_ready: false },
    BuiltinGame { id: "connected", title: "Connected", description: "# Connected", thumbnail: Some("game-assets/connected/app.png"), play_url: "game-players/connected.html", screenshots: &["game-assets/connected/app.png"], web_ready: false },
    BuiltinGame { id: "cosmic-heat-pygame-main", title: "cosmic-heat-pygame-main", description: "# Cosmic Heat", thumbnail: Some("game-assets/cosmic-heat-pygame-main/app.png"), play_url: "game-players/cosmic-heat-pygame-main.html", screenshots: &["game-assets/cosmic-heat-pygame-main/app.png"], web_ready: false },
    BuiltinGame { id: "ghostbusters", title: "GhostBusters", description: "# GhostBusters", thumbnail: Some("game-assets/ghostbusters/app.png"), play_url: "game-players/ghostbusters.html", screenshots: &["game-assets/ghostbusters/app.png"], web_ready: true },
    BuiltinGame { id: "hypertile-dash", title: "HyperTile Dash", description: "# HyperTiles Dash", thumbnail: Some("game-assets/hypertile-dash/app.gif"), play_url: "game-players/hypertile-dash.html", screenshots: &["game-assets/hypertile-dash/app.gif"], web_ready: false },
    BuiltinGame { id: "memory-puzzle", title: "Memory Puzzle", description: "# Fruit Memory Puzzle", thumbnail: Some("game-assets/memory-puzzle/app.gif"), play_url: "game-players/memory-puzzle.html", screenshots: &["game-assets/memory-puzzle/app.gif"], web_ready: false },
];

impl From<&BuiltinGame> for GameRecord {
    fn from(game: &BuiltinGame) -> Self {
        GameRecord {
            id: game.id.to_string(),
            title: game.title.to_string(),
            description: game.description.to_string(),
            thumbnail: game.thumbnail.map(str::to_string),
            play_url: game.play_url.to_string(),
            screenshots: game.screenshots.iter().map(|s| s.to_string()).collect(),
            web_ready: game.web_ready,
        }
    }
}

const ENTRY_FILES: [&str; 2] = ["main.py", "game.py"];
const PREVIEW_FILES: [&str; 5] = ["app.png", "app.gif", "screenshot.png", "preview.png", "app.jpg"];
const SKIPPED_DIRS: [&str; 2] = ["FRONTEND", "__pycache__"];

/// Builds a record for one game folder, or `None` when it has no entry script.
fn discover_game(dir: &Path) -> Option<GameRecord> {
    let name = dir.file_name()?.to_str()?;
    if SKIPPED_DIRS.contains(&name) {
        return None;
    }
    let entry = ENTRY_FILES.iter().map(|f| dir.join(f)).find(|p| p.is_file())?;

    // First line of the README, if any
    let description = fs::read_to_string(dir.join("README.md"))
        .ok()
        .and_then(|readme| readme.lines().next().map(|l| l.trim().to_string()))
        .unwrap_or_default();
    let thumbnail = PREVIEW_FILES
        .iter()
        .map(|f| dir.join(f))
        .find(|p| p.is_file())
        .map(|p| p.display().to_string());

    Some(GameRecord {
        id: name.to_lowercase().replace(' ', "-"),
        title: name.to_string(),
        description,
        screenshots: thumbnail.iter().cloned().collect(),
        thumbnail,
        play_url: entry.display().to_string(),
        web_ready: false,
    })
}

/// Ordered, read-only list of games.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    games: Vec<GameRecord>,
}

impl Catalog {
    pub fn new(games: Vec<GameRecord>) -> Self {
        Self { games }
    }

    /// The shelf compiled into the binary.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_GAMES.iter().map(GameRecord::from).collect())
    }

    /// Decode a catalog from a JSON array of game records.
    pub fn from_json(json: &str) -> Result<Self> {
        let games: Vec<GameRecord> =
            serde_json::from_str(json).context("catalog is not a JSON array of games")?;
        Ok(Self::new(games))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("failed to decode catalog {}", path.display()))
    }

    /// Scan `dir` for game folders (those holding `main.py` or `game.py`),
    /// sorted by folder name. The play URL is the entry script's path.
    pub fn discover(dir: &Path) -> Result<Self> {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("failed to read games directory {}", dir.display()))?;
        let mut dirs: Vec<PathBuf> = entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect();
        dirs.sort();
        Ok(Self::new(dirs.iter().filter_map(|d| discover_game(d)).collect()))
    }

    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&GameRecord> {
        self.games.get(index)
    }

    /// Index of the game whose id matches, ignoring ASCII case.
    pub fn position_by_id(&self, id: &str) -> Option<usize> {
        self.games.iter().position(|g| g.id.eq_ignore_ascii_case(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_ids_are_unique() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 8);
        let ids: HashSet<&str> = catalog.games().iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_builtin_keeps_order() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.games()[0].id, "aeroblasters");
        assert_eq!(catalog.games()[7].id, "memory-puzzle");
    }

    #[test]
    fn test_from_json_games_data_shape() {
        let json = r##"[
            {
                "id": "arc-dash",
                "title": "Arc Dash",
                "description": "# Arc Dash",
                "thumbnail": null,
                "playUrl": "game-players/arc-dash.html",
                "screenshots": [],
                "webReady": true
            },
            { "id": "bare", "title": "Bare", "playUrl": "bare.html" }
        ]"##;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        let arc = &catalog.games()[0];
        assert_eq!(arc.thumbnail, None);
        assert_eq!(arc.play_url, "game-players/arc-dash.html");
        assert!(arc.web_ready);
        let bare = &catalog.games()[1];
        assert!(bare.screenshots.is_empty());
        assert!(bare.description.is_empty());
        assert!(!bare.web_ready);
    }

    #[test]
    fn test_from_json_rejects_non_array() {
        assert!(Catalog::from_json(r#"{"id": "x"}"#).is_err());
    }

    #[test]
    fn test_load_missing_file_mentions_path() {
        let err = Catalog::load(Path::new("/nonexistent/gameshelf/games.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/gameshelf/games.json"));
    }

    /// Fresh scratch directory under the system temp dir.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gameshelf-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_discover_game_folders() {
        let root = scratch_dir("discover");
        let make = |name: &str, files: &[(&str, &str)]| {
            let dir = root.join(name);
            fs::create_dir_all(&dir).unwrap();
            for (file, body) in files {
                fs::write(dir.join(file), body).unwrap();
            }
        };
        make("Space Race", &[("main.py", ""), ("README.md", "  # Space Race  \nmore text\n"), ("app.gif", "")]);
        make("Arc Dash", &[("game.py", "")]);
        make("assets", &[("logo.png", "")]);
        make("__pycache__", &[("main.py", "")]);
        fs::write(root.join("notes.txt"), "").unwrap();

        let catalog = Catalog::discover(&root).unwrap();
        let ids: Vec<&str> = catalog.games().iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["arc-dash", "space-race"]);

        let arc = &catalog.games()[0];
        assert_eq!(arc.title, "Arc Dash");
        assert!(arc.description.is_empty());
        assert_eq!(arc.thumbnail, None);
        assert!(arc.screenshots.is_empty());
        assert!(arc.play_url.ends_with("game.py"));

        let space = &catalog.games()[1];
        assert_eq!(space.description, "# Space Race");
        assert!(space.thumbnail.as_deref().unwrap().ends_with("app.gif"));
        assert_eq!(space.screenshots.len(), 1);
        assert!(space.play_url.ends_with("main.py"));
        assert!(!space.web_ready);

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_discover_missing_dir() {
        let err = Catalog::discover(Path::new("/nonexistent/gameshelf/games")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read games directory"));
    }

    #[test]
    fn test_preview_image_falls_back_to_screenshot() {
        let catalog = Catalog::builtin();
        let mut game = catalog.games()[0].clone();
        assert_eq!(game.preview_image(), Some("game-assets/aeroblasters/app.png"));
        game.thumbnail = None;
        game.screenshots = vec!["shot-1.png".into(), "shot-2.png".into()];
        assert_eq!(game.preview_image(), Some("shot-1.png"));
        game.screenshots.clear();
        assert_eq!(game.preview_image(), None);
    }

    #[test]
    fn test_position_by_id_ignores_case() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.position_by_id("GhostBusters"), Some(5));
        assert_eq!(catalog.position_by_id("pinball"), None);
    }
}
