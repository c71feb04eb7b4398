//! Terminal shell for character creation
//!
//! Wires the adapters into a `CharacterCreationService` and drives it from a
//! line-oriented input stream. Each screen is re-rendered from the service
//! after every command, so the shell holds no wizard state of its own.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use errant_domain::{Catalog, StepOptions};
use errant_player_adapters::{
    ClientConfig, ConsoleNotifier, FileStorageProvider, HttpCharacterApi, ShellNavigator,
};
use errant_player_app::{CharacterCreationService, SessionService};
use errant_player_ports::outbound::{Credential, Destination};

/// Everything the shell loop needs
pub struct RunnerDeps {
    pub service: Arc<CharacterCreationService>,
    pub session: SessionService,
    pub navigator: Arc<ShellNavigator>,
}

/// Build the production object graph.
pub fn wire(config: &ClientConfig) -> Result<RunnerDeps> {
    let catalog = Arc::new(Catalog::standard().context("Built-in catalog is inconsistent")?);
    let api = HttpCharacterApi::from_config(config).context("Failed to create API client")?;
    let session = SessionService::new(Arc::new(FileStorageProvider::open(
        &config.session_file,
    )));
    let navigator = Arc::new(ShellNavigator::new());

    let service = CharacterCreationService::new(
        catalog,
        Arc::new(api),
        session.clone(),
        navigator.clone(),
        Arc::new(ConsoleNotifier::stdout()),
    );

    Ok(RunnerDeps {
        service: Arc::new(service),
        session,
        navigator,
    })
}

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Pick the n-th option (1-based) on the current screen
    Choose(usize),
    Next,
    Back,
    Reset,
    /// Submit, optionally naming the character
    Create(Option<String>),
    /// Store a bearer token obtained at login
    Token(String),
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    if let Ok(n) = word.parse::<usize>() {
        if n == 0 || !rest.is_empty() {
            return Err(format!("Pick an option between 1 and the number shown, not {line:?}"));
        }
        return Ok(Command::Choose(n));
    }

    match word.to_ascii_lowercase().as_str() {
        "next" | "n" => Ok(Command::Next),
        "back" | "b" => Ok(Command::Back),
        "reset" => Ok(Command::Reset),
        "create" | "c" => Ok(Command::Create(
            Some(rest.to_string()).filter(|name| !name.is_empty()),
        )),
        "token" if !rest.is_empty() => Ok(Command::Token(rest.to_string())),
        "token" => Err("Usage: token <value>".to_string()),
        "help" | "?" | "" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(format!("Unknown command {other:?}. Type `help` for commands.")),
    }
}

const HELP: &str = "\
Commands:
  <number>        choose an option
  next | n        continue to the next step
  back | b        go back one step
  reset           start over
  create [name]   create the character (defaults to \"<race> <class>\")
  token <value>   store your login token
  quit | q        leave";

/// Run the shell until the user quits, input ends, or a character exists.
pub async fn run<R, W>(deps: RunnerDeps, input: R, mut out: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let RunnerDeps {
        service,
        session,
        navigator,
    } = deps;

    if session.credential().is_none() {
        writeln!(out, "No login token stored. Use `token <value>` before creating a character.")?;
    } else {
        match service.existing_character().await {
            Ok(Some(record)) => {
                writeln!(
                    out,
                    "You already have an active character: {}.",
                    record.name().unwrap_or("unnamed")
                )?;
                return Ok(());
            }
            Ok(None) => {}
            // Server unreachable: fall back to the character cached at creation.
            Err(_) => {
                if let Some(record) = session.cached_character() {
                    writeln!(
                        out,
                        "Could not reach the server. Last known character: {}.",
                        record.name().unwrap_or("unnamed")
                    )?;
                    return Ok(());
                }
            }
        }
    }

    let mut lines = input.lines();
    loop {
        render(&service, &mut out)?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };

        // Failures from the service are already shown through the notifier.
        match parse_command(&line) {
            Ok(Command::Choose(n)) => {
                if !choose(&service, n) {
                    writeln!(out, "There is no option {n} here.")?;
                }
            }
            Ok(Command::Next) => {
                let _ = service.advance();
            }
            Ok(Command::Back) => {
                let _ = service.retreat();
            }
            Ok(Command::Reset) => service.reset(),
            Ok(Command::Create(name)) => {
                let _ = service.submit(name.as_deref()).await;
                if navigator.take() == Some(Destination::Start) {
                    writeln!(out, "Character created. Returning to the start screen.")?;
                    break;
                }
            }
            Ok(Command::Token(token)) => match Credential::new(token) {
                Some(credential) => {
                    session.store_credential(&credential);
                    writeln!(out, "Token stored.")?;
                }
                None => writeln!(out, "Token cannot be blank.")?,
            },
            Ok(Command::Help) => writeln!(out, "{HELP}")?,
            Ok(Command::Quit) => break,
            Err(message) => writeln!(out, "{message}")?,
        }
    }

    out.flush()?;
    Ok(())
}

/// Select the n-th listed option. Returns `false` if there is no such option.
fn choose(service: &CharacterCreationService, n: usize) -> bool {
    let Some(index) = n.checked_sub(1) else {
        return false;
    };
    match service.current_options() {
        StepOptions::Factions(options) => {
            let Some(option) = options.get(index) else {
                return false;
            };
            let _ = service.select_faction(option.faction.name());
        }
        StepOptions::Races(options) => {
            let Some(option) = options.get(index) else {
                return false;
            };
            let _ = service.select_race(option.race.name());
        }
        StepOptions::Classes(options) => {
            let Some(option) = options.get(index) else {
                return false;
            };
            let _ = service.select_class(option.class.name());
        }
    }
    true
}

fn marker(selected: bool) -> &'static str {
    if selected {
        " *"
    } else {
        ""
    }
}

fn render(service: &CharacterCreationService, out: &mut impl Write) -> std::io::Result<()> {
    let validation = service.validation();
    writeln!(out)?;
    writeln!(out, "== {} ==", validation.step.title())?;

    let options = service.current_options();
    if options.is_empty() {
        writeln!(out, "    Nothing to choose here. Go back and pick again.")?;
    }
    match options {
        StepOptions::Factions(options) => {
            for (i, option) in options.iter().enumerate() {
                let faction = &option.faction;
                writeln!(
                    out,
                    "{:>2}. {} {}{}",
                    i + 1,
                    faction.emblem(),
                    faction.name(),
                    marker(option.selected)
                )?;
                writeln!(out, "      {}", faction.description())?;
            }
        }
        StepOptions::Races(options) => {
            for (i, option) in options.iter().enumerate() {
                let race = &option.race;
                writeln!(
                    out,
                    "{:>2}. {}{}",
                    i + 1,
                    race.name(),
                    marker(option.selected)
                )?;
                writeln!(out, "      {}", race.description())?;
                if !race.traits().is_empty() {
                    writeln!(out, "      Traits: {}", race.traits().join(", "))?;
                }
            }
        }
        StepOptions::Classes(options) => {
            for (i, option) in options.iter().enumerate() {
                let class = &option.class;
                let hint = option
                    .unavailable_hint()
                    .map(|hint| format!(" ({hint})"))
                    .unwrap_or_default();
                writeln!(
                    out,
                    "{:>2}. {} {}{}{}",
                    i + 1,
                    class.emblem(),
                    class.name(),
                    marker(option.selected),
                    hint
                )?;
            }
        }
    }

    let mut controls = Vec::new();
    if validation.can_retreat {
        controls.push("back");
    }
    if validation.can_advance && !validation.step.is_terminal() {
        controls.push("next");
    }
    if validation.can_submit {
        controls.push("create [name]");
    }
    controls.push("help");
    writeln!(out, "[{}]", controls.join("] ["))?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use errant_player_ports::outbound::{storage_keys, ApiError, CharacterApiPort, StorageProvider};
    use errant_player_ports::{CharacterRecord, CreateCharacterRequest, CreateCharacterResponse};
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[test]
    fn test_parse_numbers_and_words() {
        assert_eq!(parse_command(" 2 "), Ok(Command::Choose(2)));
        assert_eq!(parse_command("NEXT"), Ok(Command::Next));
        assert_eq!(parse_command("b"), Ok(Command::Back));
        assert_eq!(parse_command("q"), Ok(Command::Quit));
        assert_eq!(parse_command(""), Ok(Command::Help));
    }

    #[test]
    fn test_parse_create_with_and_without_name() {
        assert_eq!(parse_command("create"), Ok(Command::Create(None)));
        assert_eq!(
            parse_command("create  El Cid "),
            Ok(Command::Create(Some("El Cid".to_string())))
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_command("0").is_err());
        assert!(parse_command("3 4").is_err());
        assert!(parse_command("token").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[derive(Default)]
    struct RecordingApi {
        requests: Mutex<Vec<CreateCharacterRequest>>,
        offline: bool,
    }

    #[async_trait::async_trait]
    impl CharacterApiPort for RecordingApi {
        async fn create_character(
            &self,
            _credential: &Credential,
            request: &CreateCharacterRequest,
        ) -> Result<CreateCharacterResponse, ApiError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(CreateCharacterResponse::created(
                format!("Welcome, {}! Your legend begins...", request.name),
                CharacterRecord::new(serde_json::json!({ "id": 1, "name": request.name })),
            ))
        }

        async fn active_character(
            &self,
            _credential: &Credential,
        ) -> Result<Option<CharacterRecord>, ApiError> {
            if self.offline {
                return Err(ApiError::RequestFailed("connection refused".to_string()));
            }
            Ok(None)
        }
    }

    #[derive(Default)]
    struct MemoryStorage(Mutex<HashMap<String, String>>);

    impl StorageProvider for MemoryStorage {
        fn save(&self, key: &str, value: &str) {
            self.0.lock().unwrap().insert(key.to_string(), value.to_string());
        }

        fn load(&self, key: &str) -> Option<String> {
            self.0.lock().unwrap().get(key).cloned()
        }

        fn remove(&self, key: &str) {
            self.0.lock().unwrap().remove(key);
        }
    }

    fn deps(api: Arc<RecordingApi>) -> RunnerDeps {
        deps_with_storage(api, MemoryStorage::default())
    }

    fn deps_with_storage(api: Arc<RecordingApi>, storage: MemoryStorage) -> RunnerDeps {
        let session = SessionService::new(Arc::new(storage));
        let navigator = Arc::new(ShellNavigator::new());
        let service = CharacterCreationService::new(
            Arc::new(Catalog::standard().unwrap()),
            api,
            session.clone(),
            navigator.clone(),
            Arc::new(ConsoleNotifier::to_writer(std::io::sink())),
        );
        RunnerDeps {
            service: Arc::new(service),
            session,
            navigator,
        }
    }

    #[tokio::test]
    async fn test_scripted_session_creates_character() {
        let api = Arc::new(RecordingApi::default());
        let script = b"token tok-1\n1\nnext\n1\nnext\n6\n1\ncreate El Cid\nquit\n";
        let mut out = Vec::new();

        run(deps(api.clone()), &script[..], &mut out).await.unwrap();

        let requests = api.requests.lock().unwrap();
        assert_eq!(
            *requests,
            vec![CreateCharacterRequest {
                faction: "The Crusaders".to_string(),
                race: "Castilian".to_string(),
                character_class: "Knight".to_string(),
                name: "El Cid".to_string(),
            }]
        );
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("== Choose Your Calling =="));
        assert!(text.contains("Mystic Poet (Available to: Leonese, Andalusian, Mashriqi)"));
        assert!(text.contains("Character created."));
    }

    #[tokio::test]
    async fn test_out_of_range_choice_is_explained() {
        let api = Arc::new(RecordingApi::default());
        let mut out = Vec::new();

        run(deps(api.clone()), &b"9\nquit\n"[..], &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("There is no option 9 here."));
        assert!(api.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_offline_start_shows_cached_character() {
        let api = Arc::new(RecordingApi {
            offline: true,
            ..RecordingApi::default()
        });
        let storage = MemoryStorage::default();
        storage.save(storage_keys::TOKEN, "tok-1");
        storage.save(storage_keys::CHARACTER, r#"{"id":2,"name":"Ximena"}"#);
        let mut out = Vec::new();

        run(deps_with_storage(api.clone(), storage), &b"1
"[..], &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Last known character: Ximena."));
        assert!(!text.contains("== "));
    }

    #[tokio::test]
    async fn test_offline_start_without_cache_opens_wizard() {
        let api = Arc::new(RecordingApi {
            offline: true,
            ..RecordingApi::default()
        });
        let storage = MemoryStorage::default();
        storage.save(storage_keys::TOKEN, "tok-1");
        let mut out = Vec::new();

        run(deps_with_storage(api, storage), &b"quit
"[..], &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("Last known character"));
        assert!(text.contains("The Crusaders"));
    }
}
