//! Static messages for the help chat widget

/// Topics offered as buttons in the chat window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    /// Why the house always wins
    Probability,
    /// Where to get help
    Resources,
    /// Independence of rounds, no winning strategy
    Questions,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Probability, Topic::Resources, Topic::Questions];

    /// Key used in the button's `data-response` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Probability => "probability",
            Topic::Resources => "resources",
            Topic::Questions => "questions",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "probability" => Some(Topic::Probability),
            "resources" => Some(Topic::Resources),
            "questions" => Some(Topic::Questions),
            _ => None,
        }
    }

    /// Bot reply for this topic
    pub fn message(&self) -> &'static str {
        match self {
            Topic::Probability => {
                "Les jeux d'argent sont conçus pour que la maison gagne toujours. \
                 L'espérance mathématique est négative : tu perds en moyenne 30% de chaque mise. \
                 C'est programmé ainsi pour que les casinos et sites de jeux fassent des profits."
            }
            Topic::Resources => {
                "Si tu as besoin d'aide :\n\n\
                 • Ligne 1 800 461-0140 (24/7)\n\
                 • Site web : www.aideaujeu.gouv.qc.ca\n\
                 • Chat en ligne disponible\n\n\
                 Tu n'es pas seul, des ressources existent."
            }
            Topic::Questions => {
                "Les probabilités dans les jeux d'argent sont fixes et défavorables. \
                 Chaque partie est indépendante : les résultats passés n'influencent pas les futurs. \
                 Il n'existe aucune stratégie pour battre le hasard sur le long terme."
            }
        }
    }
}

/// Reply for a `data-response` key, if it names a topic
pub fn response_for(key: &str) -> Option<&'static str> {
    Topic::from_str(key).map(|topic| topic.message())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip() {
        for topic in Topic::ALL {
            assert_eq!(Topic::from_str(topic.as_str()), Some(topic));
        }
        assert_eq!(Topic::from_str(" Resources "), Some(Topic::Resources));
    }

    #[test]
    fn test_unknown_key_has_no_reply() {
        assert_eq!(response_for("jackpot"), None);
        assert_eq!(response_for(""), None);
    }

    #[test]
    fn test_messages() {
        assert!(Topic::Probability.message().contains("30%"));
        assert!(Topic::Resources.message().contains("1 800 461-0140"));
        assert!(Topic::Resources.message().contains("\n\n•"));
        assert!(response_for("questions").unwrap().contains("indépendante"));
    }
}
