// src/models/stats.rs

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

// ---
// 1. TeamStats (o agregado que a API devolve)
// ---
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub total_teams: i64,
    pub teams_with_lead: i64,
    pub teams_with_head: i64,
    pub teams_with_manager: i64,
    // Média de membros considerando apenas equipes com >= 1 membro.
    pub average_team_size: f64,
    // "quantidade de membros" -> "quantas equipes têm exatamente essa quantidade"
    pub team_size_histogram: BTreeMap<i64, i64>,
    pub teams_with_projects: i64,
    pub teams_with_candidates: i64,
    pub total_projects: i64,
    pub total_candidates: i64,
    pub average_projects_per_team: f64,
    pub average_candidates_per_team: f64,
}

// ---
// 2. Fontes cruas (o que o repositório coleta no banco)
// ---
#[derive(Debug, Clone, Default)]
pub struct StatsSources {
    pub total_teams: i64,
    pub teams_with_lead: i64,
    pub teams_with_head: i64,
    pub teams_with_manager: i64,
    // Um elemento por equipe com >= 1 membro (resultado do GROUP BY).
    pub member_counts: Vec<i64>,
    pub teams_with_projects: i64,
    pub teams_with_candidates: i64,
    pub total_projects: i64,
    pub total_candidates: i64,
}

impl TeamStats {
    // Toda divisão protege o zero devolvendo 0.
    pub fn from_sources(src: StatsSources) -> Self {
        let total_members: i64 = src.member_counts.iter().sum();
        let populated_teams = src.member_counts.len() as i64;

        let average_team_size = if populated_teams > 0 {
            total_members as f64 / populated_teams as f64
        } else {
            0.0
        };

        let mut team_size_histogram = BTreeMap::new();
        for count in &src.member_counts {
            *team_size_histogram.entry(*count).or_insert(0) += 1;
        }

        let average_projects_per_team = if src.total_teams > 0 {
            src.total_projects as f64 / src.total_teams as f64
        } else {
            0.0
        };
        let average_candidates_per_team = if src.total_teams > 0 {
            src.total_candidates as f64 / src.total_teams as f64
        } else {
            0.0
        };

        Self {
            total_teams: src.total_teams,
            teams_with_lead: src.teams_with_lead,
            teams_with_head: src.teams_with_head,
            teams_with_manager: src.teams_with_manager,
            average_team_size,
            team_size_histogram,
            teams_with_projects: src.teams_with_projects,
            teams_with_candidates: src.teams_with_candidates,
            total_projects: src.total_projects,
            total_candidates: src.total_candidates,
            average_projects_per_team,
            average_candidates_per_team,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_yields_all_zeros() {
        let stats = TeamStats::from_sources(StatsSources::default());
        assert_eq!(stats.total_teams, 0);
        assert_eq!(stats.average_team_size, 0.0);
        assert_eq!(stats.average_projects_per_team, 0.0);
        assert_eq!(stats.average_candidates_per_team, 0.0);
        assert!(stats.team_size_histogram.is_empty());
    }

    #[test]
    fn average_ignores_empty_teams() {
        // 5 equipes no total, mas só 3 têm membros (4, 4 e 1).
        let stats = TeamStats::from_sources(StatsSources {
            total_teams: 5,
            member_counts: vec![4, 4, 1],
            ..Default::default()
        });
        assert_eq!(stats.average_team_size, 3.0);
        assert_eq!(stats.team_size_histogram.get(&4), Some(&2));
        assert_eq!(stats.team_size_histogram.get(&1), Some(&1));
        assert_eq!(stats.team_size_histogram.get(&0), None);
    }

    #[test]
    fn per_team_averages_use_total_teams() {
        // Projetos/candidatos dividem pelo total de equipes, inclusive as vazias.
        let stats = TeamStats::from_sources(StatsSources {
            total_teams: 4,
            total_projects: 6,
            total_candidates: 2,
            teams_with_projects: 3,
            teams_with_candidates: 1,
            ..Default::default()
        });
        assert_eq!(stats.average_projects_per_team, 1.5);
        assert_eq!(stats.average_candidates_per_team, 0.5);
        assert_eq!(stats.teams_with_projects, 3);
    }

    #[test]
    fn histogram_keys_serialize_as_strings() {
        let stats = TeamStats::from_sources(StatsSources {
            total_teams: 2,
            member_counts: vec![3, 3],
            ..Default::default()
        });
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["teamSizeHistogram"]["3"], 2);
    }
}
