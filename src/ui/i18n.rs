//! Message tables for the two supported locales.
//!
//! Lookup falls back to English for keys missing in German, and to the key
//! itself as a last resort so untranslated strings stay visible instead of
//! vanishing.

use super::locale::Locale;

/// Resolve `key` in `locale`, falling back to English, then to the key.
pub fn lookup(locale: Locale, key: &'static str) -> &'static str {
    translate(locale, key)
        .or_else(|| translate(Locale::En, key))
        .unwrap_or(key)
}

pub fn translate(locale: Locale, key: &str) -> Option<&'static str> {
    match locale {
        Locale::De => de(key),
        Locale::En => en(key),
    }
}

fn de(key: &str) -> Option<&'static str> {
    Some(match key {
        "nav.home" => "Start",
        "nav.dashboard" => "Übersicht",
        "nav.enrollTeam" => "Team anmelden",
        "nav.enrollClass" => "Klasse anmelden",
        "nav.enrollFuture" => "Gruppe anmelden",
        "nav.teamDetail" => "Team",
        "nav.classDetail" => "Klasse",
        "nav.notFound" => "Seite nicht gefunden",
        "nav.login" => "Anmelden",
        "nav.logout" => "Abmelden",

        "home.title" => "Coach-Portal",
        "home.intro" => "Melde deine Teams, Klassen und Gruppen zum Programm an.",
        "home.forbidden" => {
            "Dein Konto hat keinen Coach-Zugang. Bitte wende dich an das Programmbüro."
        }
        "home.toDashboard" => "Zur Übersicht",

        "dashboard.enrollHeading" => "Neue Anmeldung",
        "dashboard.teamsHeading" => "Meine Teams",
        "dashboard.classesHeading" => "Meine Klassen",
        "dashboard.emptyTeams" => "Noch keine Teams angemeldet.",
        "dashboard.emptyClasses" => "Noch keine Klassen angemeldet.",
        "dashboard.optionFoundersTeamExplore" => "Founders: Explore-Team",
        "dashboard.optionFoundersTeamChallenge" => "Founders: Challenge-Team",
        "dashboard.optionFoundersClassExplore" => "Founders: Explore-Klasse",
        "dashboard.optionFoundersClassChallenge" => "Founders: Challenge-Klasse",
        "dashboard.optionFutureGroup5" => "Future: Gruppe 5+",
        "dashboard.optionFutureGroup8" => "Future: Gruppe 8+",

        "form.name" => "Name",
        "form.location" => "Ort",
        "form.organization" => "Organisation / Schule",
        "form.voucher" => "Gutscheincode",
        "form.checkVoucher" => "Gutschein prüfen",
        "form.voucherValid" => "Gutschein gültig.",
        "form.voucherInvalid" => "Gutschein ungültig.",
        "form.voucherBoundAddress" => "Dieser Gutschein legt die Rechnungsadresse fest:",
        "form.deliveryAddress" => "Lieferadresse",
        "form.invoiceAddress" => "Rechnungsadresse",
        "form.pupils" => "Anzahl Kinder",
        "form.submit" => "Anmeldung absenden",
        "form.success" => "Anmeldung übermittelt.",

        "team.players" => "Spielerliste",
        "team.firstname" => "Vorname",
        "team.lastname" => "Nachname",
        "team.gender" => "Geschlecht",
        "team.birthday" => "Geburtstag",
        "team.addPlayer" => "Spieler hinzufügen",
        "team.remove" => "Entfernen",
        "team.saveRoster" => "Spielerliste speichern",
        "team.shipmentDeferral" => "Versandaufschub",
        "team.saveShipmentDeferral" => "Versandaufschub speichern",
        "detail.documents" => "Dokumente",
        "detail.download" => "Herunterladen",
        "detail.docConfirmation" => "Anmeldebestätigung",
        "detail.docInvoice" => "Rechnung",

        "common.loading" => "Lade…",
        "common.error" => "Das hat leider nicht geklappt.",
        "common.back" => "Zurück",
        "common.save" => "Speichern",
        "common.checkingSession" => "Sitzung wird geprüft…",
        "common.redirecting" => "Weiterleitung…",

        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    Some(match key {
        "nav.home" => "Home",
        "nav.dashboard" => "Dashboard",
        "nav.enrollTeam" => "Enroll team",
        "nav.enrollClass" => "Enroll class",
        "nav.enrollFuture" => "Enroll group",
        "nav.teamDetail" => "Team",
        "nav.classDetail" => "Class",
        "nav.notFound" => "Page not found",
        "nav.login" => "Sign in",
        "nav.logout" => "Sign out",

        "home.title" => "Coach portal",
        "home.intro" => "Enroll your teams, classes and groups into the program.",
        "home.forbidden" => "Your account has no coach access. Please contact the program office.",
        "home.toDashboard" => "Go to dashboard",

        "dashboard.enrollHeading" => "New enrollment",
        "dashboard.teamsHeading" => "My teams",
        "dashboard.classesHeading" => "My classes",
        "dashboard.emptyTeams" => "No teams enrolled yet.",
        "dashboard.emptyClasses" => "No classes enrolled yet.",
        "dashboard.optionFoundersTeamExplore" => "Founders: Explore team",
        "dashboard.optionFoundersTeamChallenge" => "Founders: Challenge team",
        "dashboard.optionFoundersClassExplore" => "Founders: Explore class",
        "dashboard.optionFoundersClassChallenge" => "Founders: Challenge class",
        "dashboard.optionFutureGroup5" => "Future: group 5+",
        "dashboard.optionFutureGroup8" => "Future: group 8+",

        "form.name" => "Name",
        "form.location" => "Location",
        "form.organization" => "Organization / school",
        "form.voucher" => "Voucher code",
        "form.checkVoucher" => "Check voucher",
        "form.voucherValid" => "Voucher is valid.",
        "form.voucherInvalid" => "Voucher is invalid.",
        "form.voucherBoundAddress" => "This voucher fixes the invoice address:",
        "form.deliveryAddress" => "Delivery address",
        "form.invoiceAddress" => "Invoice address",
        "form.pupils" => "Number of pupils",
        "form.submit" => "Submit enrollment",
        "form.success" => "Enrollment submitted.",

        "team.players" => "Player roster",
        "team.firstname" => "First name",
        "team.lastname" => "Last name",
        "team.gender" => "Gender",
        "team.birthday" => "Birthday",
        "team.addPlayer" => "Add player",
        "team.remove" => "Remove",
        "team.saveRoster" => "Save roster",
        "team.shipmentDeferral" => "Shipment deferral",
        "team.saveShipmentDeferral" => "Save shipment deferral",
        "detail.documents" => "Documents",
        "detail.download" => "Download",
        "detail.docConfirmation" => "Enrollment confirmation",
        "detail.docInvoice" => "Invoice",

        "common.loading" => "Loading…",
        "common.error" => "Something went wrong.",
        "common.back" => "Back",
        "common.save" => "Save",
        "common.checkingSession" => "Checking session…",
        "common.redirecting" => "Redirecting…",

        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::enrollment::ENROLLMENT_OPTIONS;
    use crate::core::routes;

    const KEYS: &[&str] = &[
        "nav.home",
        "nav.dashboard",
        "nav.enrollTeam",
        "nav.enrollClass",
        "nav.enrollFuture",
        "nav.teamDetail",
        "nav.classDetail",
        "nav.notFound",
        "nav.login",
        "nav.logout",
        "home.title",
        "home.intro",
        "home.forbidden",
        "home.toDashboard",
        "dashboard.enrollHeading",
        "dashboard.teamsHeading",
        "dashboard.classesHeading",
        "dashboard.emptyTeams",
        "dashboard.emptyClasses",
        "form.name",
        "form.location",
        "form.organization",
        "form.voucher",
        "form.checkVoucher",
        "form.voucherValid",
        "form.voucherInvalid",
        "form.voucherBoundAddress",
        "form.deliveryAddress",
        "form.invoiceAddress",
        "form.pupils",
        "form.submit",
        "form.success",
        "team.players",
        "team.firstname",
        "team.lastname",
        "team.gender",
        "team.birthday",
        "team.addPlayer",
        "team.remove",
        "team.saveRoster",
        "team.shipmentDeferral",
        "team.saveShipmentDeferral",
        "detail.documents",
        "detail.download",
        "detail.docConfirmation",
        "detail.docInvoice",
        "common.loading",
        "common.error",
        "common.back",
        "common.save",
        "common.checkingSession",
        "common.redirecting",
    ];

    #[test]
    fn every_key_exists_in_both_locales() {
        for key in KEYS {
            assert!(translate(Locale::De, key).is_some(), "de missing {key}");
            assert!(translate(Locale::En, key).is_some(), "en missing {key}");
        }
    }

    #[test]
    fn catalog_labels_resolve() {
        for option in &ENROLLMENT_OPTIONS {
            assert!(
                translate(Locale::De, option.label_key).is_some(),
                "de missing {}",
                option.label_key
            );
            assert!(
                translate(Locale::En, option.label_key).is_some(),
                "en missing {}",
                option.label_key
            );
        }
    }

    #[test]
    fn route_titles_resolve() {
        for meta in [
            routes::HOME,
            routes::DASHBOARD,
            routes::ENROLL_TEAM,
            routes::ENROLL_CLASS,
            routes::ENROLL_FUTURE,
            routes::TEAM_DETAIL,
            routes::CLASS_DETAIL,
        ] {
            assert!(translate(Locale::En, meta.title_key).is_some());
        }
    }

    #[test]
    fn unknown_keys_fall_back_to_the_key_itself() {
        assert_eq!(lookup(Locale::De, "no.such.key"), "no.such.key");
    }

    #[test]
    fn lookup_prefers_the_requested_locale() {
        assert_eq!(lookup(Locale::De, "nav.dashboard"), "Übersicht");
        assert_eq!(lookup(Locale::En, "nav.dashboard"), "Dashboard");
    }
}
