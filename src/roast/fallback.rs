//! Canned roasts for when the LLM is unavailable.
//!
//! One template per language where we have a translation; everything
//! else falls back to English. `{username}` is substituted verbatim.

use crate::types::Language;

/// Model name reported for canned roasts.
pub const FALLBACK_MODEL: &str = "canned";

const EN: &str = "Ladies and gentlemen, {username} has entered the building! *air horn* \
Their commit history reads like a diary of someone fighting their own code and losing. \
Half the repos are forks, the other half are apologies. *crowd laughs* \
They push to main like it owes them money! \
The last README they wrote just says TODO. *rimshot* \
But hey, at least the code is consistent. Consistently broken! *crowd boos* \
Give it up for {username}, the only developer whose green squares are all from editing the profile README.";

const ES: &str = "¡Damas y caballeros, {username} ha llegado! *air horn* \
Su historial de commits parece el diario de alguien peleando contra su propio código. \
La mitad de sus repos son forks y la otra mitad son disculpas. *crowd laughs* \
¡Hace push a main como si main le debiera dinero! \
Su último README solo dice TODO. *rimshot* \
Un aplauso para {username}, el único dev cuyos cuadritos verdes vienen de editar su README de perfil.";

const FR: &str = "Mesdames et messieurs, {username} est dans la place ! *air horn* \
Son historique de commits ressemble au journal intime de quelqu'un qui se bat contre son propre code. \
La moitié de ses dépôts sont des forks, l'autre moitié des excuses. *crowd laughs* \
Il pousse sur main comme si main lui devait de l'argent ! \
Son dernier README dit juste TODO. *rimshot* \
Applaudissez {username}, le seul dev dont les carrés verts viennent de l'édition de son README de profil.";

const DE: &str = "Meine Damen und Herren, {username} ist im Haus! *air horn* \
Die Commit-Historie liest sich wie das Tagebuch von jemandem, der gegen den eigenen Code kämpft und verliert. \
Die Hälfte der Repos sind Forks, die andere Hälfte Entschuldigungen. *crowd laughs* \
Es wird auf main gepusht, als ob main Geld schulden würde! \
Das letzte README sagt nur TODO. *rimshot* \
Applaus für {username}, deren grüne Kästchen alle vom Bearbeiten des Profil-READMEs stammen.";

/// Canned per-language roast with the username substituted.
///
/// Languages without a translation get the English template.
pub fn fallback_roast(username: &str, language: Language) -> String {
    let template = match language {
        Language::En => EN,
        Language::Es => ES,
        Language::Fr => FR,
        Language::De => DE,
        // No translation yet; English it is.
        Language::Hi | Language::Zh | Language::Ja | Language::Ru => EN,
    };
    template.replace("{username}", username)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_username_verbatim() {
        let roast = fallback_roast("mona-lisa", Language::En);
        assert!(roast.contains("mona-lisa"));
        assert!(!roast.contains("{username}"));
    }

    #[test]
    fn untranslated_language_falls_back_to_english() {
        let roast = fallback_roast("octocat", Language::Ja);
        assert_eq!(roast, fallback_roast("octocat", Language::En));
    }

    #[test]
    fn translated_languages_differ_from_english() {
        for lang in [Language::Es, Language::Fr, Language::De] {
            assert_ne!(
                fallback_roast("octocat", lang),
                fallback_roast("octocat", Language::En)
            );
        }
    }

    #[test]
    fn every_template_is_splittable_into_sentences() {
        for lang in [Language::En, Language::Es, Language::Fr, Language::De] {
            let roast = fallback_roast("octocat", lang);
            assert!(roast.contains('.') || roast.contains('!'));
        }
    }
}
