use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

use rayon::prelude::*;

use super::board::{BoardView, ScrabbleBoard};
use super::constraint::CrossCheckGrid;
use super::dictionary::{Dictionary, State};
use super::rack::Rack;
use super::util::{spell, Direction, Letter, Placement, Position};
use crate::config::GeneratorConfig;

/// How many steps pass between two reads of the clock
const DEADLINE_POLL: u64 = 256;

/// Result of one search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    pub moves: HashSet<Placement>,
    /// The step budget or the time limit ran out before the search finished,
    /// so `moves` may be missing placements
    pub truncated: bool,
    /// Extension steps taken
    pub steps: u64,
}

/// Shared across every anchor of a search. Once tripped, all branches stop
struct Budget {
    steps: AtomicU64,
    limit: Option<u64>,
    deadline: Option<Instant>,
    exhausted: AtomicBool,
    stop: AtomicBool,
    first_only: bool,
}

impl Budget {
    fn new(config: &GeneratorConfig, first_only: bool) -> Self {
        Self {
            steps: AtomicU64::new(0),
            limit: config.step_budget,
            deadline: config.time_limit().map(|d| Instant::now() + d),
            exhausted: AtomicBool::new(false),
            stop: AtomicBool::new(false),
            first_only,
        }
    }

    /// Counts one step. Returns false when the search has to stop
    fn tick(&self) -> bool {
        if self.stop.load(Ordering::Relaxed) {
            return false;
        }
        let n = self.steps.fetch_add(1, Ordering::Relaxed) + 1;
        let over_steps = self.limit.is_some_and(|limit| n > limit);
        let over_time =
            n % DEADLINE_POLL == 0 && self.deadline.is_some_and(|d| Instant::now() >= d);
        if over_steps || over_time {
            self.exhausted.store(true, Ordering::Relaxed);
            self.stop.store(true, Ordering::Relaxed);
            return false;
        }
        true
    }

    fn found(&self) {
        if self.first_only {
            self.stop.store(true, Ordering::Relaxed);
        }
    }
}

/// Generates every legal placement of a rack on a board.
///
/// The search is written for words running across. Words running down are found
/// by running the same search over the transposed board and swapping the
/// coordinates of what it finds.
pub struct MoveGenerator<'a> {
    dict: &'a Dictionary,
    board: &'a ScrabbleBoard,
    config: GeneratorConfig,
}

impl<'a> MoveGenerator<'a> {
    pub fn new(dict: &'a Dictionary, board: &'a ScrabbleBoard, config: GeneratorConfig) -> Self {
        Self {
            dict,
            board,
            config,
        }
    }

    /// Membership check for a word typed in by a player
    pub fn is_valid_word(&self, word: &str) -> bool {
        self.dict.is_word(word)
    }

    /// All legal placements for the rack. The rack itself is left untouched
    pub fn generate_moves(&self, rack: &Rack) -> HashSet<Placement> {
        self.search(rack).moves
    }

    pub fn search(&self, rack: &Rack) -> SearchOutcome {
        self.run(rack, false)
    }

    /// Checks if a move can be played at all, stopping at the first one found
    pub fn has_moves(&self, rack: &Rack) -> bool {
        !self.run(rack, true).moves.is_empty()
    }

    fn run(&self, rack: &Rack, first_only: bool) -> SearchOutcome {
        let budget = Budget::new(&self.config, first_only);
        let view = self.board.view();
        let lines = [
            self.line(view, Direction::Across, &budget),
            self.line(view.transposed(), Direction::Down, &budget),
        ];

        let jobs = lines
            .iter()
            .flat_map(|line| line.view.anchors().into_iter().map(move |a| (line, a)))
            .collect::<Vec<_>>();
        log::debug!("Searching {} anchors for rack {}", jobs.len(), rack);

        let found: Vec<Vec<Placement>> = if self.config.parallel && !first_only {
            jobs.par_iter()
                .map(|(line, anchor)| line.search_anchor(*anchor, rack))
                .collect()
        } else {
            jobs.iter()
                .map(|(line, anchor)| line.search_anchor(*anchor, rack))
                .collect()
        };
        let moves = found.into_iter().flatten().collect::<HashSet<_>>();

        let truncated = budget.exhausted.load(Ordering::Relaxed);
        let steps = budget.steps.load(Ordering::Relaxed);
        if truncated {
            log::warn!(
                "Move search stopped early after {} steps with {} placements",
                steps,
                moves.len()
            );
        } else {
            log::debug!("Found {} placements in {} steps", moves.len(), steps);
        }

        SearchOutcome {
            moves,
            truncated,
            steps,
        }
    }

    fn line<'b>(
        &'b self,
        view: BoardView<'b>,
        dir: Direction,
        budget: &'b Budget,
    ) -> AcrossSearch<'b> {
        AcrossSearch {
            dict: self.dict,
            view,
            cross: CrossCheckGrid::build(view, self.dict, self.config.cross_checks),
            dir,
            budget,
        }
    }
}

/// Search for words running left to right over one view of the board.
/// `dir` records which real orientation the view stands for.
struct AcrossSearch<'a> {
    dict: &'a Dictionary,
    view: BoardView<'a>,
    cross: CrossCheckGrid,
    dir: Direction,
    budget: &'a Budget,
}

impl<'a> AcrossSearch<'a> {
    fn search_anchor(&self, anchor: Position, rack: &Rack) -> Vec<Placement> {
        let mut rack = rack.clone();
        let mut found = Vec::new();
        let mut partial = Vec::with_capacity(self.view.size());

        if self.view.is_filled(anchor.prev(Direction::Across)) {
            // The word has to start with the letters already sitting left of the anchor
            let prefix = self.view.run_before(anchor, Direction::Across);
            if let Some(state) = self.dict.state_after_letters(&prefix) {
                partial.extend(prefix);
                self.extend_right(&mut partial, &mut rack, state, anchor, anchor, &mut found);
            }
        } else {
            let limit = self.left_limit(anchor);
            self.left_part(
                &mut partial,
                &mut rack,
                self.dict.root(),
                anchor,
                limit,
                &mut found,
            );
        }
        found
    }

    /// Number of empty squares a left part may cover. The square next to a tile
    /// is held back so the word never runs into a tile it does not spell
    fn left_limit(&self, anchor: Position) -> usize {
        let mut limit: usize = 0;
        let mut curr = anchor.prev(Direction::Across);
        while self.view.is_empty(curr) {
            limit += 1;
            curr = curr.prev(Direction::Across);
        }
        if self.view.is_filled(curr) {
            limit.saturating_sub(1)
        } else {
            limit
        }
    }

    /// Builds every left part of up to `limit` rack letters, extending right from
    /// the anchor after each one
    fn left_part(
        &self,
        partial: &mut Vec<Letter>,
        rack: &mut Rack,
        state: State<'a>,
        anchor: Position,
        limit: usize,
        found: &mut Vec<Placement>,
    ) {
        if !self.budget.tick() {
            return;
        }
        if self.left_fits(partial, anchor) {
            self.extend_right(partial, rack, state, anchor, anchor, found);
        }
        if limit == 0 {
            return;
        }
        for l in state.edges().intersect(rack.available()).iter() {
            if let Some(next) = state.next(l) {
                rack.remove_inplace(l);
                partial.push(l);
                self.left_part(partial, rack, next, anchor, limit - 1, found);
                partial.pop();
                rack.add_inplace(l);
            }
        }
    }

    /// Where a left part lands depends on its final length, so its cross checks
    /// are only known once it is complete
    fn left_fits(&self, partial: &[Letter], anchor: Position) -> bool {
        let start = anchor.col - partial.len();
        partial.iter().enumerate().all(|(i, &l)| {
            self.cross
                .allowed(Position::new(anchor.row, start + i))
                .contains(l)
        })
    }

    fn extend_right(
        &self,
        partial: &mut Vec<Letter>,
        rack: &mut Rack,
        state: State<'a>,
        pos: Position,
        anchor: Position,
        found: &mut Vec<Placement>,
    ) {
        if !self.budget.tick() {
            return;
        }
        // Only past the anchor has a tile been laid on it
        if !self.view.is_filled(pos) && pos.col > anchor.col && state.is_accepting() {
            self.record(partial, pos, found);
        }

        if self.view.is_empty(pos) {
            let choices = state
                .edges()
                .intersect(rack.available())
                .intersect(self.cross.allowed(pos));
            for l in choices.iter() {
                if let Some(next) = state.next(l) {
                    rack.remove_inplace(l);
                    partial.push(l);
                    self.extend_right(
                        partial,
                        rack,
                        next,
                        pos.next(Direction::Across),
                        anchor,
                        found,
                    );
                    partial.pop();
                    rack.add_inplace(l);
                }
            }
        } else if let Some(l) = self.view.letter_at(pos) {
            // Letters on the board are free
            if let Some(next) = state.next(l) {
                partial.push(l);
                self.extend_right(
                    partial,
                    rack,
                    next,
                    pos.next(Direction::Across),
                    anchor,
                    found,
                );
                partial.pop();
            }
        }
    }

    /// `end` is the square just past the word
    fn record(&self, partial: &[Letter], end: Position, found: &mut Vec<Placement>) {
        let start = Position::new(end.row, end.col - partial.len());
        let pos = match self.dir {
            Direction::Across => start,
            Direction::Down => start.transpose(),
        };
        found.push(Placement::new(spell(partial), pos, self.dir));
        self.budget.found();
    }
}
