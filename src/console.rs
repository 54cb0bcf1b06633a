use crate::game::{GameSession, MoveOutcome};
use crate::movegen::{GameState, Move};
use crate::opponent::MinimaxOpponent;
use crate::record::GameRecord;
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

const HELP: &str = "commands: new | show | move <e2e4> | undo | redo | ai [depth] | state | save | load <record> | quit\n";

/// Line-oriented text front end over a [`GameSession`].
pub struct ConsoleHandler {
    session: GameSession,
    ai_depth: u32,
}

impl ConsoleHandler {
    pub fn new(ai_depth: u32) -> Self {
        let mut session = GameSession::new();
        session.start();
        ConsoleHandler {
            session,
            ai_depth: ai_depth.max(1),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut reader = stdin.lock();
        let mut line = String::new();

        println!("{}", self.session.board());
        print!("{}", HELP);
        stdout.flush()?;

        while reader.read_line(&mut line)? > 0 {
            let command = line.trim();
            if command == "quit" {
                break;
            }

            match self.handle_command(command) {
                Ok(response) => print!("{}", response),
                Err(e) => println!("error: {:#}", e),
            }

            stdout.flush()?;
            line.clear();
        }
        Ok(())
    }

    pub fn handle_command(&mut self, command: &str) -> Result<String> {
        let parts: Vec<&str> = command.split_whitespace().collect();
        if parts.is_empty() {
            return Ok("".to_string());
        }

        match parts[0] {
            "new" => Ok(self.handle_new()),
            "show" => Ok(format!("{}\n", self.session.board())),
            "move" => self.handle_move(&parts[1..]),
            "undo" => Ok(self.handle_history(GameSession::undo)),
            "redo" => Ok(self.handle_history(GameSession::redo)),
            "ai" => self.handle_ai(&parts[1..]),
            "state" => Ok(self.handle_state()),
            "save" => Ok(format!("{}\n", GameRecord::capture(&self.session))),
            "load" => self.handle_load(&parts[1..]),
            "help" => Ok(HELP.to_string()),
            other => Ok(format!("unknown command `{}`\n{}", other, HELP)),
        }
    }

    fn handle_new(&mut self) -> String {
        self.session.start();
        format!("{}\n", self.session.board())
    }

    fn handle_move(&mut self, parts: &[&str]) -> Result<String> {
        let text = parts.first().context("usage: move <from><to>")?;
        let mv: Move = text
            .parse()
            .with_context(|| format!("cannot read move `{}`", text))?;
        let outcome = self
            .session
            .try_play_move(mv.from_row, mv.from_col, mv.to_row, mv.to_col)
            .with_context(|| format!("{} rejected", mv))?;
        Ok(self.describe(&outcome))
    }

    fn handle_history(&mut self, step: fn(&mut GameSession) -> bool) -> String {
        if !step(&mut self.session) {
            return "nothing to do\n".to_string();
        }
        format!("{}\n{} to move\n", self.session.board(), self.session.current_turn())
    }

    fn handle_ai(&mut self, parts: &[&str]) -> Result<String> {
        let depth = match parts.first() {
            Some(text) => text
                .parse::<u32>()
                .with_context(|| format!("invalid depth `{}`", text))?,
            None => self.ai_depth,
        };
        let mut opponent = MinimaxOpponent::new(depth);
        let outcome = self.session.play_opponent(&mut opponent)?;
        Ok(self.describe(&outcome))
    }

    fn handle_state(&self) -> String {
        match self.session.outcome() {
            Some(state) => format!("{}\n", describe_state(state)),
            None => format!(
                "{} to move: {}\n",
                self.session.current_turn(),
                describe_state(self.session.state())
            ),
        }
    }

    fn handle_load(&mut self, parts: &[&str]) -> Result<String> {
        let text = parts.join(" ");
        let record: GameRecord = text
            .parse()
            .with_context(|| format!("cannot read record `{}`", text))?;
        record.apply_to(&mut self.session);
        Ok(format!("{}\n", self.session.board()))
    }

    fn describe(&self, outcome: &MoveOutcome) -> String {
        let mut response = format!("{}\n{}", self.session.board(), outcome.mv);
        if let Some(captured) = outcome.captured {
            response.push_str(&format!(" captures {}", captured.kind().name().to_lowercase()));
        }
        response.push('\n');
        response.push_str(&format!("{}\n", describe_state(outcome.state)));
        response
    }
}

fn describe_state(state: GameState) -> String {
    match state {
        GameState::Ongoing => "in play".to_string(),
        GameState::Check => "check".to_string(),
        GameState::Checkmate { winner } => format!("checkmate, {} wins", winner),
        GameState::Stalemate => "stalemate, draw".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;

    #[test]
    fn test_move_and_undo_commands() {
        let mut console = ConsoleHandler::new(1);
        let response = console.handle_command("move e2e4").unwrap();
        assert!(response.contains("e2-e4"));
        assert_eq!(console.session().current_turn(), Color::Black);

        assert!(console.handle_command("undo").unwrap().contains("White to move"));
        assert!(console.handle_command("redo").unwrap().contains("Black to move"));
        assert_eq!(console.handle_command("redo").unwrap(), "nothing to do\n");
    }

    #[test]
    fn test_rejected_move_is_an_error() {
        let mut console = ConsoleHandler::new(1);
        let err = console.handle_command("move e2e5").unwrap_err();
        assert!(format!("{:#}", err).contains("the piece cannot move there"));
        assert!(console.handle_command("move zz").is_err());
        assert!(console.handle_command("move").is_err());
    }

    #[test]
    fn test_fools_mate_through_commands() {
        let mut console = ConsoleHandler::new(1);
        for mv in ["f2f3", "e7e5", "g2g4"] {
            console.handle_command(&format!("move {}", mv)).unwrap();
        }
        let response = console.handle_command("move d8h4").unwrap();
        assert!(response.contains("checkmate, Black wins"));
        assert!(console.handle_command("state").unwrap().contains("checkmate"));
        assert!(console.handle_command("ai").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let mut console = ConsoleHandler::new(1);
        console.handle_command("move g1f3").unwrap();
        let saved = console.handle_command("save").unwrap();
        assert_eq!(saved, "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R b -\n");

        console.handle_command("new").unwrap();
        console.handle_command(&format!("load {}", saved.trim())).unwrap();
        assert_eq!(console.session().current_turn(), Color::Black);
        assert!(!console.session().can_undo());
        assert!(console.handle_command("load nonsense").is_err());
    }

    #[test]
    fn test_ai_command() {
        let mut console = ConsoleHandler::new(1);
        console.handle_command("ai").unwrap();
        assert_eq!(console.session().current_turn(), Color::Black);
        console.handle_command("ai 2").unwrap();
        assert_eq!(console.session().current_turn(), Color::White);
        assert!(console.handle_command("ai deep").is_err());
    }

    #[test]
    fn test_unknown_command() {
        let mut console = ConsoleHandler::new(1);
        assert!(console.handle_command("castle").unwrap().starts_with("unknown command"));
        assert_eq!(console.handle_command("   ").unwrap(), "");
    }
}
