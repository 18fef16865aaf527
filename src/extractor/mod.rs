use crate::config::SelectorConfig;
use crate::error::{AgendaError, Result};
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One fixture as served to the frontend: the championship it belongs to and
/// a pre-joined display line. The derived `Ord` (campeonato first, then
/// jogo_formatado) is the response ordering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct Game {
    pub campeonato: String,
    pub jogo_formatado: String,
}

/// Parsed selectors for the agenda page, built once at startup from a
/// [`SelectorConfig`] so a markup change upstream is a config change here.
pub struct SelectorSet {
    championship_group: Selector,
    championship_name: Selector,
    match_card: Selector,
    card_text: Selector,
    team_name: Selector,
}

impl SelectorSet {
    pub fn new(config: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            championship_group: parse_selector(&config.championship_group)?,
            championship_name: parse_selector(&config.championship_name)?,
            match_card: parse_selector(&config.match_card)?,
            card_text: parse_selector(&config.card_text)?,
            team_name: parse_selector(&config.team_name)?,
        })
    }
}

fn parse_selector(input: &str) -> Result<Selector> {
    Selector::parse(input).map_err(|e| AgendaError::Selector(e.to_string()))
}

/// Why a single fixture card was dropped. Skips are logged and swallowed;
/// one bad card never voids the rest of the schedule.
#[derive(Debug, PartialEq, Eq)]
enum SkipReason {
    NoKickoffTime,
    MissingTeams,
}

struct ParsedCard {
    kickoff: String,
    home: String,
    away: String,
}

/// Validates the `DD-MM-YYYY` route date and returns the `DD/MM/YYYY`
/// display form used verbatim in every output line.
pub fn format_display_date(date: &str) -> Result<String> {
    let parts: Vec<&str> = date.split('-').collect();
    let numeric = |p: &&str| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit());
    if parts.len() != 3 || !parts.iter().all(numeric) {
        return Err(AgendaError::InvalidDateFormat(date.to_string()));
    }
    Ok(format!("{}/{}/{}", parts[0], parts[1], parts[2]))
}

/// Extracts all fixtures for `date` from the rendered agenda markup.
///
/// Championship groups without a (non-empty) name are skipped whole; within
/// a group, cards missing a kickoff time or a pair of team names are skipped
/// individually. An empty result is not an error — the caller decides what
/// that means. The returned list is sorted by championship, then line.
pub fn extract(markup: &str, date: &str, selectors: &SelectorSet) -> Result<Vec<Game>> {
    let display_date = format_display_date(date)?;
    let document = Html::parse_document(markup);
    let mut games = Vec::new();

    for group in document.select(&selectors.championship_group) {
        let championship = match group.select(&selectors.championship_name).next() {
            Some(el) => element_text(&el),
            None => {
                debug!("championship group without a name node, skipping");
                continue;
            }
        };
        if championship.is_empty() {
            debug!("championship group with an empty name, skipping");
            continue;
        }

        for card in group.select(&selectors.match_card) {
            match parse_card(&card, selectors) {
                Ok(parsed) => games.push(Game {
                    campeonato: championship.clone(),
                    jogo_formatado: format!(
                        "{display_date} - {} - {} x {}",
                        parsed.kickoff, parsed.home, parsed.away
                    ),
                }),
                Err(reason) => debug!(%championship, ?reason, "skipping card"),
            }
        }
    }

    games.sort();
    Ok(games)
}

fn parse_card(
    card: &ElementRef,
    selectors: &SelectorSet,
) -> std::result::Result<ParsedCard, SkipReason> {
    // The kickoff time sits in one of the card's generic text spans, usually
    // the last one; scan in reverse and take the first that looks like a time.
    let texts: Vec<String> = card
        .select(&selectors.card_text)
        .map(|el| element_text(&el))
        .collect();
    let kickoff = texts
        .iter()
        .rev()
        .find(|t| t.contains(':') && t.chars().any(|c| c.is_ascii_digit()))
        .cloned()
        .ok_or(SkipReason::NoKickoffTime)?;

    let mut teams = card.select(&selectors.team_name).map(|el| element_text(&el));
    let home = teams.next().ok_or(SkipReason::MissingTeams)?;
    let away = teams.next().ok_or(SkipReason::MissingTeams)?;

    Ok(ParsedCard {
        kickoff,
        home,
        away,
    })
}

fn element_text(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selectors() -> SelectorSet {
        SelectorSet::new(&SelectorConfig::default()).unwrap()
    }

    fn card(kickoff: &str, home: &str, away: &str) -> String {
        format!(
            "<a class=\"sc-eldPxv-abc123\">\
               <span class=\"sc-jXbUNg-x\">Hoje</span>\
               <span class=\"sc-jXbUNg-x\">{kickoff}</span>\
               <span class=\"sc-eeDRCY-y\">{home}</span>\
               <span class=\"sc-eeDRCY-y\">{away}</span>\
             </a>"
        )
    }

    fn group(name: &str, cards: &[String]) -> String {
        format!(
            "<div class=\"eventGrouperstyle__GroupByChampionshipsWrapper-sc-1bz1qr-0\">\
               <span class=\"eventGrouperstyle__ChampionshipName-sc-1bz1qr-2\">{name}</span>\
               {}\
             </div>",
            cards.join("")
        )
    }

    fn page(groups: &[String]) -> String {
        format!("<html><body>{}</body></html>", groups.join(""))
    }

    #[test]
    fn extracts_single_game() {
        let markup = page(&[group(
            "Brasileirão",
            &[card("16:00", "Flamengo", "Corinthians")],
        )]);
        let games = extract(&markup, "05-08-2024", &selectors()).unwrap();
        assert_eq!(
            games,
            vec![Game {
                campeonato: "Brasileirão".to_string(),
                jogo_formatado: "05/08/2024 - 16:00 - Flamengo x Corinthians".to_string(),
            }]
        );
    }

    #[test]
    fn extracts_all_cards_from_all_groups() {
        let markup = page(&[
            group(
                "Brasileirão",
                &[
                    card("16:00", "Flamengo", "Corinthians"),
                    card("18:30", "Palmeiras", "Santos"),
                ],
            ),
            group(
                "Premier League",
                &[
                    card("11:00", "Arsenal", "Chelsea"),
                    card("13:30", "Liverpool", "Everton"),
                ],
            ),
        ]);
        let games = extract(&markup, "05-08-2024", &selectors()).unwrap();
        assert_eq!(games.len(), 4);
    }

    #[test]
    fn card_without_time_is_skipped_without_affecting_siblings() {
        let no_time = "<a class=\"sc-eldPxv-abc\">\
                         <span class=\"sc-jXbUNg-x\">A definir</span>\
                         <span class=\"sc-eeDRCY-y\">Botafogo</span>\
                         <span class=\"sc-eeDRCY-y\">Fluminense</span>\
                       </a>"
            .to_string();
        let markup = page(&[group(
            "Brasileirão",
            &[no_time, card("16:00", "Flamengo", "Corinthians")],
        )]);
        let games = extract(&markup, "05-08-2024", &selectors()).unwrap();
        assert_eq!(games.len(), 1);
        assert!(games[0].jogo_formatado.contains("Flamengo"));
    }

    #[test]
    fn card_with_one_team_is_skipped() {
        let one_team = "<a class=\"sc-eldPxv-abc\">\
                          <span class=\"sc-jXbUNg-x\">16:00</span>\
                          <span class=\"sc-eeDRCY-y\">Flamengo</span>\
                        </a>"
            .to_string();
        let markup = page(&[group(
            "Brasileirão",
            &[one_team, card("18:30", "Palmeiras", "Santos")],
        )]);
        let games = extract(&markup, "05-08-2024", &selectors()).unwrap();
        assert_eq!(games.len(), 1);
        assert!(games[0].jogo_formatado.contains("Palmeiras"));
    }

    #[test]
    fn group_with_empty_name_is_skipped_entirely() {
        let markup = page(&[
            group("", &[card("16:00", "Flamengo", "Corinthians")]),
            group("Libertadores", &[card("21:30", "Grêmio", "Peñarol")]),
        ]);
        let games = extract(&markup, "05-08-2024", &selectors()).unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].campeonato, "Libertadores");
    }

    #[test]
    fn group_without_name_node_is_skipped_entirely() {
        let nameless = format!(
            "<div class=\"eventGrouperstyle__GroupByChampionshipsWrapper-sc-1bz1qr-0\">{}</div>",
            card("16:00", "Flamengo", "Corinthians")
        );
        let markup = page(&[nameless, group("Série B", &[card("19:00", "Sport", "Ceará")])]);
        let games = extract(&markup, "05-08-2024", &selectors()).unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].campeonato, "Série B");
    }

    #[test]
    fn time_scan_takes_last_qualifying_text_span() {
        let two_times = "<a class=\"sc-eldPxv-abc\">\
                           <span class=\"sc-jXbUNg-x\">15:00</span>\
                           <span class=\"sc-jXbUNg-x\">16:00</span>\
                           <span class=\"sc-eeDRCY-y\">Flamengo</span>\
                           <span class=\"sc-eeDRCY-y\">Corinthians</span>\
                         </a>"
            .to_string();
        let markup = page(&[group("Brasileirão", &[two_times])]);
        let games = extract(&markup, "05-08-2024", &selectors()).unwrap();
        assert!(games[0].jogo_formatado.contains("16:00"));
    }

    #[test]
    fn output_is_sorted_regardless_of_input_order() {
        let markup_a = page(&[
            group("Z League", &[card("10:00", "A", "B")]),
            group(
                "A League",
                &[card("22:00", "C", "D"), card("09:00", "E", "F")],
            ),
        ]);
        let markup_b = page(&[
            group(
                "A League",
                &[card("09:00", "E", "F"), card("22:00", "C", "D")],
            ),
            group("Z League", &[card("10:00", "A", "B")]),
        ]);
        let sel = selectors();
        let games_a = extract(&markup_a, "05-08-2024", &sel).unwrap();
        let games_b = extract(&markup_b, "05-08-2024", &sel).unwrap();
        assert_eq!(games_a, games_b);
        assert_eq!(games_a[0].campeonato, "A League");
        assert!(games_a[0].jogo_formatado.contains("09:00"));
    }

    #[test]
    fn extract_is_idempotent() {
        let markup = page(&[group(
            "Brasileirão",
            &[
                card("16:00", "Flamengo", "Corinthians"),
                card("18:30", "Palmeiras", "Santos"),
            ],
        )]);
        let sel = selectors();
        let first = extract(&markup, "05-08-2024", &sel).unwrap();
        let second = extract(&markup, "05-08-2024", &sel).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn no_groups_yields_empty_list() {
        let games = extract("<html><body></body></html>", "05-08-2024", &selectors()).unwrap();
        assert!(games.is_empty());
    }

    #[test]
    fn display_date_reassembles_segments() {
        assert_eq!(format_display_date("05-08-2024").unwrap(), "05/08/2024");
    }

    #[test]
    fn malformed_dates_are_rejected() {
        for date in ["05/08/2024", "05-08", "05-08-2024-1", "", "aa-bb-cccc", "05--2024"] {
            let err = format_display_date(date).unwrap_err();
            assert!(matches!(err, AgendaError::InvalidDateFormat(_)), "{date}");
        }
    }

    #[test]
    fn date_is_validated_before_markup_is_touched() {
        let err = extract("not even html", "bogus", &selectors()).unwrap_err();
        assert!(matches!(err, AgendaError::InvalidDateFormat(_)));
    }
}
