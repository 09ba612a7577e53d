//! Fixed representative roster: reference data used to populate selection
//! choices when a debt is created. It never constrains what gets stored;
//! freeform names are always accepted as a fallback.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RosterClient {
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub market: &'static str,
}

impl RosterClient {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

const fn c(first_name: &'static str, last_name: &'static str, market: &'static str) -> RosterClient {
    RosterClient {
        first_name,
        last_name,
        market,
    }
}

pub const ROSTER: &[(&str, &[RosterClient])] = &[
    (
        "YAYA CAMARA",
        &[
            c("ABDOULAYE", "TRAORE", "KONATEBOUGOU"),
            c("AMINATA", "BALLO", "FADJIGUILA"),
            c("BASSIDIKY", "FAMATA", "NGOLONINA"),
            c("BROULAYE", "DIARRA", "BANCONI-FARADA"),
            c("BA OUMAR", "SOUMOUNOU", "MEDINE"),
            c("DJIBRIL", "SIDIBE", "MEDINE"),
            c("FAH", "COULIBALY", "MARSEILLE"),
            c("FAMOUSSA", "DIAWARA", "NAFADJI"),
            c("FANTA", "DIARRA", "BAGADADJI"),
            c("ISSA", "DOLO", "MORIBABOUGOU"),
            c("MAHAMADOU", "DIAMOUTENE", "BOULKASSOBOUGOU"),
            c("MAMA", "TRAORE", "TITIBOUGOU"),
            c("MOUSSA", "CISSE", "DIALAKORODJI"),
            c("SALIF", "DJOURTE", "MEDINE"),
            c("SOULEYMANE", "TRAORE", "BANCONI-FLABOUGOU"),
            c("YAYA", "SOUKOULE", "DJELIBOUGOU"),
        ],
    ),
    (
        "DIDIER DEMBELE",
        &[
            c("ABDOUL", "TOURE", "HAMDALAYE"),
            c("ISSA", "DIALLO", "HAMDALAYE"),
            c("GOURO", "MAIGA", "NTOMINKOROBOUGOU"),
            c("FATOUMATA", "BAGAYOKO", "WOLOFOBOUGOU"),
            c("ALOU", "SIDIBE", "DIBIDANI"),
            c("DJENABA", "DIARRA", "KATI"),
            c("BEDY", "KEITA", "LAFIABOUGOU-TALIKO"),
            c("SOUMAILA", "THIERO", "LAFIABOUGOU2"),
            c("MOUSSA", "TRAORE", "KANADJIGUILA"),
            c("IDRISSA", "KEITA", "KANADJIGUILA"),
            c("OUMOU", "SIDIBE", "DJICORONI-PARA1"),
            c("AMIDOU", "KANTE", "SEBENICORO"),
            c("DJELIKA", "KEITA", "DJICORONI-PARA1"),
            c("MAH", "KONATE", "LAFIABOUGOU1"),
            c("DJIBRIL", "SIDIBE", "LAFIABOUGOU1"),
        ],
    ),
    (
        "ISSA DIAKITE",
        &[
            c("ABOU", "SAMAKE", "KALABAN-ECHANGEUR"),
            c("ABDOULAYE", "DICKO", "SIRAKORO"),
            c("ADAMA", "DIARRA", "KALABAN-ECHANGEUR"),
            c("ADAMA", "DIARRA", "MOUSSABOUGOU"),
            c("AMIDOU", "COULIBALY", "KALABAN-KOULOUBLENI"),
            c("AMIDOU", "KODIO", "DAOUDABOUGOU"),
            c("AMINATA", "TRAORE", "KALABAN-CORO"),
            c("BAMOULAYE", "TRAORE", "YIRIMADIO"),
            c("BINTOU", "DIALLO", "MAGNAMBOUGOU"),
            c("CHAKA", "DOUMBIA", "BACODJICORONI"),
            c("DJIBRYL", "SYLLA", "SOKORODJI"),
            c("DRAMANE", "OUATARRA", "SENOU"),
            c("FAMOUGOURY", "SAMAKE", "BANANKABOUGOU"),
            c("FATOUMATA", "CISSE", "ATTBOUGOU"),
            c("FATOUMATA", "DIAKITE", "SABALIBOUGOU"),
            c("HAMA", "NANTOUME", "NIAMAKORO-CHIEBOUGOUNI"),
            c("HAMADOUNE", "BAH", "SOGONIKO"),
            c("ISAC", "BERTHE", "NIAMAKORO-SUGU-COURA"),
            c("ISSA", "SAGARA", "ZERNI"),
            c("KADER", "TRAORE", "BACODJICORONI-ACI"),
            c("KAROUNGA", "DIARRA", "OLYMPE"),
            c("LASSINE", "TRAORE", "GUOANA"),
            c("MAMADOU", "DIABATE", "BADALABOUGOU"),
            c("MARIAM", "SANOGO", "KABALA"),
            c("MOHAMED", "TRAORE", "TOROKOROBOUGOU"),
            c("MOUMINE", "DIAKITE", "NIAMAKORO-SUGU-KORO"),
            c("MOUSSA", "GACKOU", "KALABAN-PRINCIPAL"),
            c("MOUSSA", "KEITA", "SABALIBOUGOU-COURANI"),
            c("MOUSSA", "KONE", "KALABAN-ACI"),
            c("NOUHOUM", "TRAORE", "NIAMAKORO-COURANI"),
            c("SEYDOU", "DOUGNON", "KALABAN-KOULOUBA"),
            c("SOULEYMANE", "GUINDO", "ALAMINE-SUGU"),
            c("THIEMOKO", "SIDIBE", "GARANTIBOUGOU"),
            c("TOGOLAIS", "YAO", "NIAMANA"),
        ],
    ),
];

pub fn representatives() -> Vec<&'static str> {
    ROSTER.iter().map(|(name, _)| *name).collect()
}

pub fn clients_of(representative: &str) -> Option<&'static [RosterClient]> {
    ROSTER
        .iter()
        .find(|(name, _)| *name == representative)
        .map(|(_, clients)| *clients)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_lookup_by_representative() {
        assert_eq!(representatives().len(), 3);
        let clients = clients_of("YAYA CAMARA").unwrap();
        assert_eq!(clients.len(), 16);
        assert_eq!(clients[0].display_name(), "ABDOULAYE TRAORE");
        assert!(clients_of("PERSONNE").is_none());
    }
}
