//! Glue code tying content, the battle session and the terminal together.
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use tactics_content::ContentFactory;
use tactics_core::{
    BattleEvent, BattleSession, BattleStatus, CharacterRecord, SeededDice, Target, UnitId,
};

use crate::command::{Command, HELP};
use crate::config::CliConfig;

pub struct CliApp {
    cli_config: CliConfig,
    factory: ContentFactory,
    records: Vec<CharacterRecord>,
    session: BattleSession,
}

impl CliApp {
    /// Loads config, weapons and roster from the data directory.
    pub fn load(cli_config: CliConfig) -> Result<Self> {
        let factory = ContentFactory::new(cli_config.data_dir.clone());
        let battle_config = cli_config.apply(
            factory
                .load_config()
                .context("failed to load battle configuration")?,
        );
        let records = factory
            .load_roster()
            .context("failed to load roster")?;

        tracing::info!(
            data_dir = %factory.data_dir().display(),
            combatants = records.len(),
            seed = battle_config.seed,
            "content loaded"
        );

        let dice = Box::new(SeededDice::new(battle_config.seed));
        let session = BattleSession::initialize(battle_config, &records, dice);

        Ok(Self {
            cli_config,
            factory,
            records,
            session,
        })
    }

    pub async fn run(mut self) -> Result<()> {
        let mut input = BufReader::new(tokio::io::stdin()).lines();
        let mut ticker = tokio::time::interval(Duration::from_millis(
            self.session.config().tick_interval_ms,
        ));

        println!("{HELP}");
        self.session.start_battle();
        self.flush_events();

        loop {
            let status = self.session.run();
            self.flush_events();

            match status {
                BattleStatus::TickElapsed(_) => {
                    ticker.tick().await;
                }
                BattleStatus::AwaitingInput(unit) => {
                    if !self.player_turn(unit, &mut input).await? {
                        tracing::info!("player left the battle");
                        return Ok(());
                    }
                }
                BattleStatus::Ended(outcome) => {
                    println!("== {outcome} ==");
                    break;
                }
            }
        }

        self.finish()
    }

    /// Reads commands until the turn ends. Returns `false` on quit or EOF.
    async fn player_turn(
        &mut self,
        unit: UnitId,
        input: &mut Lines<BufReader<Stdin>>,
    ) -> Result<bool> {
        self.print_status();

        while self.session.active_unit() == Some(unit) {
            print!("{unit}> ");
            std::io::Write::flush(&mut std::io::stdout())?;

            let Some(line) = input.next_line().await? else {
                return Ok(false);
            };
            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(err) => {
                    println!("{err}");
                    continue;
                }
            };

            // Failures are reported as IntentRejected events.
            match command {
                Command::Move => {
                    let _ = self.session.use_move_action();
                }
                Command::Attack {
                    target,
                    slot,
                    burst,
                } => {
                    let _ = self.session.attack(target, slot, burst);
                }
                Command::Stance(stance) => {
                    let _ = self.session.switch_stance(stance);
                }
                Command::Reload(slot) => {
                    let _ = self.session.reload(slot);
                }
                Command::End => {
                    let _ = self.session.end_turn();
                }
                Command::Status => self.print_status(),
                Command::Help => println!("{HELP}"),
                Command::Quit => return Ok(false),
            }
            self.flush_events();
        }

        Ok(true)
    }

    fn print_status(&self) {
        for participant in self.session.participants() {
            let combatant = &participant.combatant;
            println!(
                "  {} {:<10} {:>3}/{:<3} HP  {}  stance {}",
                combatant.id(),
                combatant.name(),
                combatant.current_hp(),
                combatant.health().maximum(),
                combatant.armor_breakdown(),
                combatant.stance(),
            );
        }

        let Some(unit) = self.session.active_unit() else {
            return;
        };
        let Some(active) = self.session.participant(unit) else {
            return;
        };
        for (slot, weapon) in active.loadout.iter().enumerate() {
            match weapon.magazine() {
                Some(mag) => println!(
                    "  [{slot}] {} ({}/{} loaded, {} reserve)",
                    weapon.name(),
                    mag.loaded(),
                    mag.capacity(),
                    mag.reserve()
                ),
                None => println!("  [{slot}] {}", weapon.name()),
            }
        }
    }

    fn flush_events(&mut self) {
        for event in self.session.drain_events() {
            match event {
                BattleEvent::TickElapsed { tick } => tracing::trace!(tick, "tick"),
                event => println!("{event}"),
            }
        }
    }

    fn finish(mut self) -> Result<()> {
        let updated = self.session.write_back(&mut self.records);
        tracing::info!(updated, "battle state written back to records");

        if self.cli_config.save_roster {
            self.factory
                .save_roster(&self.records)
                .context("failed to save roster")?;
            tracing::info!(path = %self.factory.data_dir().display(), "roster saved");
        }
        Ok(())
    }
}
