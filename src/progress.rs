//! Learner progress and achievements.
//!
//! The record is owned by the caller: every update takes it by value and
//! hands back the new record together with whatever achievements the update
//! unlocked. Nothing is kept in global or session state here.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Write as _;
use tracing::info;

use crate::constants::CORE_STANDARDS_TOTAL;
use crate::sports::Sport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    FirstProblem,
    ProblemCrusher,
    MultiSportAnalyst,
    AllSportAthlete,
    FirstStandard,
    StandardsMaster,
    Researcher,
    OptimizationExpert,
}

impl Achievement {
    pub fn title(&self) -> &'static str {
        match self {
            Achievement::FirstProblem => "First Problem Solved",
            Achievement::ProblemCrusher => "Problem Crusher",
            Achievement::MultiSportAnalyst => "Multi-Sport Analyst",
            Achievement::AllSportAthlete => "All-Sport Athlete",
            Achievement::FirstStandard => "Standards Rookie",
            Achievement::StandardsMaster => "Standards Master",
            Achievement::Researcher => "Sports Researcher",
            Achievement::OptimizationExpert => "Optimization Expert",
        }
    }

    fn is_earned(&self, progress: &Progress) -> bool {
        match self {
            Achievement::FirstProblem => progress.problems_solved >= 1,
            Achievement::ProblemCrusher => progress.problems_solved >= 10,
            Achievement::MultiSportAnalyst => progress.sports_analyzed.len() >= 3,
            Achievement::AllSportAthlete => progress.sports_analyzed.len() >= Sport::ALL.len(),
            Achievement::FirstStandard => !progress.standards_mastered.is_empty(),
            Achievement::StandardsMaster => progress.standards_mastered.len() >= CORE_STANDARDS_TOTAL,
            Achievement::Researcher => !progress.research_projects.is_empty(),
            Achievement::OptimizationExpert => progress.optimization_score >= 100,
        }
    }

    const ALL: [Achievement; 8] = [
        Achievement::FirstProblem,
        Achievement::ProblemCrusher,
        Achievement::MultiSportAnalyst,
        Achievement::AllSportAthlete,
        Achievement::FirstStandard,
        Achievement::StandardsMaster,
        Achievement::Researcher,
        Achievement::OptimizationExpert,
    ];
}

impl std::fmt::Display for Achievement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Level derived from accumulated points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Level {
    pub number: u32,
    pub title: &'static str,
}

// (minimum points, title), ascending
const LEVELS: [(u32, &str); 5] = [
    (0, "Rookie"),
    (50, "Varsity"),
    (150, "All-Star"),
    (300, "MVP"),
    (500, "Hall of Famer"),
];

const POINTS_PER_PROBLEM: u32 = 10;
const POINTS_PER_STANDARD: u32 = 25;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub student_name: Option<String>,
    pub grade_level: Option<String>,
    pub standards_focus: Option<String>,
    pub problems_solved: u32,
    pub standards_mastered: BTreeSet<String>,
    pub sports_analyzed: BTreeSet<Sport>,
    pub optimization_score: u32,
    /// In the order they were earned; no duplicates
    pub achievements: Vec<Achievement>,
    pub research_projects: Vec<String>,
}

/// New record plus the achievements the update unlocked
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    pub progress: Progress,
    pub earned: Vec<Achievement>,
}

impl Progress {
    pub fn new(student_name: &str) -> Self {
        Self {
            student_name: Some(student_name.to_string()),
            ..Default::default()
        }
    }

    /// A solved problem in `sport`, worth `optimization_points` extra
    pub fn record_problem(mut self, sport: Sport, optimization_points: u32) -> ProgressUpdate {
        self.problems_solved = self.problems_solved.saturating_add(1);
        self.sports_analyzed.insert(sport);
        self.optimization_score = self.optimization_score.saturating_add(optimization_points);
        self.award_new()
    }

    /// Recording an already-mastered standard changes nothing
    pub fn record_standard_mastered(mut self, standard_id: &str) -> ProgressUpdate {
        self.standards_mastered.insert(standard_id.trim().to_string());
        self.award_new()
    }

    pub fn record_research_project(mut self, title: &str) -> ProgressUpdate {
        self.research_projects.push(title.to_string());
        self.award_new()
    }

    pub fn points(&self) -> u32 {
        let standards = self.standards_mastered.len() as u32;
        self.problems_solved
            .saturating_mul(POINTS_PER_PROBLEM)
            .saturating_add(standards.saturating_mul(POINTS_PER_STANDARD))
            .saturating_add(self.optimization_score)
    }

    pub fn level(&self) -> Level {
        let points = self.points();
        let index = LEVELS.iter().rposition(|(min, _)| points >= *min).unwrap_or(0);
        Level {
            number: index as u32 + 1,
            title: LEVELS[index].1,
        }
    }

    pub fn latest_achievement(&self) -> Option<Achievement> {
        self.achievements.last().copied()
    }

    /// Plain-text progress report.
    ///
    /// Only available once a student is named and has mastered at least one
    /// standard; `date` is printed as given.
    pub fn report(&self, date: &str) -> Option<String> {
        let name = self.student_name.as_deref()?;
        if self.standards_mastered.is_empty() {
            return None;
        }

        let level = self.level();
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = writeln!(out, "SPORTS QUADRATICS: PROGRESS REPORT");
        let _ = writeln!(out);
        let _ = writeln!(out, "Student: {}", name);
        let _ = writeln!(out, "Grade Level: {}", self.grade_level.as_deref().unwrap_or("-"));
        let _ = writeln!(out, "Standards Focus: {}", self.standards_focus.as_deref().unwrap_or("-"));
        let _ = writeln!(out, "Date: {}", date);
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "STANDARDS MASTERY ({} of {}):",
            self.standards_mastered.len(),
            CORE_STANDARDS_TOTAL
        );
        for standard in &self.standards_mastered {
            let _ = writeln!(out, "  [x] {}", standard);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "PERFORMANCE METRICS:");
        let _ = writeln!(out, "  Problems Solved: {}", self.problems_solved);
        let sports: Vec<String> = self.sports_analyzed.iter().map(|s| s.to_string()).collect();
        let _ = writeln!(
            out,
            "  Sports Analyzed: {}",
            if sports.is_empty() { "none yet".to_string() } else { sports.join(", ") }
        );
        let _ = writeln!(out, "  Optimization Score: {}", self.optimization_score);
        let _ = writeln!(out, "  Research Projects: {}", self.research_projects.len());
        let _ = writeln!(out, "  Level: {} ({})", level.number, level.title);
        let _ = writeln!(out);
        let _ = writeln!(out, "ACHIEVEMENTS EARNED:");
        if self.achievements.is_empty() {
            let _ = writeln!(out, "  none yet");
        }
        for achievement in &self.achievements {
            let _ = writeln!(out, "  * {}", achievement);
        }
        Some(out)
    }

    fn award_new(mut self) -> ProgressUpdate {
        let earned: Vec<Achievement> = Achievement::ALL
            .iter()
            .copied()
            .filter(|a| !self.achievements.contains(a) && a.is_earned(&self))
            .collect();

        for achievement in &earned {
            info!(
                student = self.student_name.as_deref().unwrap_or("anonymous"),
                achievement = %achievement,
                "achievement earned"
            );
        }
        self.achievements.extend(earned.iter().copied());

        ProgressUpdate {
            progress: self,
            earned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_problem_awards_once() {
        let update = Progress::new("Jordan").record_problem(Sport::Basketball, 5);
        assert_eq!(update.earned, vec![Achievement::FirstProblem]);
        assert_eq!(update.progress.problems_solved, 1);
        assert_eq!(update.progress.optimization_score, 5);

        let update = update.progress.record_problem(Sport::Basketball, 0);
        assert!(update.earned.is_empty());
        assert_eq!(update.progress.achievements, vec![Achievement::FirstProblem]);
        assert_eq!(update.progress.sports_analyzed.len(), 1);
    }

    #[test]
    fn test_multi_sport_and_all_sport() {
        let mut progress = Progress::default();
        let mut earned = Vec::new();
        for sport in Sport::ALL {
            let update = progress.record_problem(sport, 0);
            earned.extend(update.earned);
            progress = update.progress;
        }
        assert!(earned.contains(&Achievement::MultiSportAnalyst));
        assert_eq!(progress.latest_achievement(), Some(Achievement::AllSportAthlete));
        assert_eq!(progress.sports_analyzed.len(), 5);
    }

    #[test]
    fn test_standards_are_a_set() {
        let progress = Progress::new("Sam")
            .record_standard_mastered("A-REI.B.4.a")
            .progress
            .record_standard_mastered(" A-REI.B.4.a ")
            .progress;
        assert_eq!(progress.standards_mastered.len(), 1);
        assert_eq!(progress.achievements, vec![Achievement::FirstStandard]);
    }

    #[test]
    fn test_standards_master() {
        let mut progress = Progress::default();
        for i in 0..CORE_STANDARDS_TOTAL {
            progress = progress.record_standard_mastered(&format!("STD-{}", i)).progress;
        }
        assert!(progress.achievements.contains(&Achievement::StandardsMaster));
    }

    #[test]
    fn test_levels() {
        let progress = Progress::default();
        assert_eq!(progress.level(), Level { number: 1, title: "Rookie" });

        // 5 problems (50 points) reaches Varsity
        let mut progress = Progress::default();
        for _ in 0..5 {
            progress = progress.record_problem(Sport::Golf, 0).progress;
        }
        assert_eq!(progress.points(), 50);
        assert_eq!(progress.level().number, 2);

        let progress = progress.record_problem(Sport::Golf, 1000).progress;
        assert_eq!(progress.level(), Level { number: 5, title: "Hall of Famer" });
        assert!(progress.achievements.contains(&Achievement::OptimizationExpert));
    }

    #[test]
    fn test_report_requires_name_and_standard() {
        let anonymous = Progress::default().record_standard_mastered("MP4").progress;
        assert_eq!(anonymous.report("2026-10-19"), None);

        let named = Progress::new("Riley");
        assert_eq!(named.report("2026-10-19"), None);

        let progress = named
            .record_problem(Sport::Tennis, 20)
            .progress
            .record_standard_mastered("F-IF.C.8.a")
            .progress
            .record_research_project("Optimal free-throw arc")
            .progress;
        let report = progress.report("2026-10-19").unwrap();
        assert!(report.contains("Student: Riley"));
        assert!(report.contains("Date: 2026-10-19"));
        assert!(report.contains("STANDARDS MASTERY (1 of 10)"));
        assert!(report.contains("[x] F-IF.C.8.a"));
        assert!(report.contains("Sports Analyzed: tennis"));
        assert!(report.contains("Research Projects: 1"));
        assert!(report.contains("* Sports Researcher"));
    }

    #[test]
    fn test_progress_serializes() {
        let progress = Progress::new("Ari").record_problem(Sport::Soccer, 3).progress;
        let json = serde_json::to_string(&progress).unwrap();
        assert!(json.contains("\"soccer\""));
        assert!(json.contains("\"first_problem\""));
        let back: Progress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, progress);
    }
}
