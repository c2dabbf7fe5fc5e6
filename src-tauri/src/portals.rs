pub const ATTENDANCE_PORTAL_ID: &str = "atende";
pub const ATTENDANCE_PORTAL_LABEL: &str = "Atende";

/// Hardware a portal expects to find ready before its page loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareProfile {
    /// Suprema RealScan-D reader behind the Valid integration service.
    Capture,
    /// Capture profile, plus the external CapturaWeb.exe must be running.
    Validation,
    /// Griaule BCC with the Valid integration service stopped.
    Smart,
    None,
}

/// Portals rendered in the embedded content view of the main window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Portal {
    Capture,
    Smart,
    LooseDocuments,
    Validation,
    PontoValid,
    PontoRenova,
}

impl Portal {
    pub const ALL: [Portal; 6] = [
        Portal::Capture,
        Portal::Smart,
        Portal::LooseDocuments,
        Portal::Validation,
        Portal::PontoValid,
        Portal::PontoRenova,
    ];

    pub fn from_id(id: &str) -> Option<Portal> {
        Self::ALL.into_iter().find(|portal| portal.id() == id.trim())
    }

    pub fn id(self) -> &'static str {
        match self {
            Portal::Capture => "captura",
            Portal::Smart => "smart",
            Portal::LooseDocuments => "doc-avulsos",
            Portal::Validation => "validacao",
            Portal::PontoValid => "ponto-valid",
            Portal::PontoRenova => "ponto-renova",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Portal::Capture => "CapturaWeb",
            Portal::Smart => "SMART (CIN)",
            Portal::LooseDocuments => "Doc Avulso (Antigo)",
            Portal::Validation => "Validação",
            Portal::PontoValid => "Ponto Valid",
            Portal::PontoRenova => "Ponto Renova",
        }
    }

    pub fn url(self) -> &'static str {
        match self {
            Portal::Capture => "https://cnhba-prod.si.valid.com.br/CapturaWebV2",
            Portal::Smart => "https://nimba.dpt.ba.gov.br:8100",
            Portal::LooseDocuments => "https://cnhba.si.valid.com.br/CapturaWeb32",
            Portal::Validation => "https://cnhba.si.valid.com.br/SiteCaptura/conta/login",
            Portal::PontoValid => "http://www.adpexpert.com.br",
            Portal::PontoRenova => "https://app2.pontomais.com.br/login",
        }
    }

    pub fn hardware_profile(self) -> HardwareProfile {
        match self {
            Portal::Capture | Portal::LooseDocuments => HardwareProfile::Capture,
            Portal::Validation => HardwareProfile::Validation,
            Portal::Smart => HardwareProfile::Smart,
            Portal::PontoValid | Portal::PontoRenova => HardwareProfile::None,
        }
    }
}

/// Display label for any view id the window title can show, attendance included.
pub fn label_for_view_id(id: &str) -> Option<&'static str> {
    if id == ATTENDANCE_PORTAL_ID {
        return Some(ATTENDANCE_PORTAL_LABEL);
    }
    Portal::from_id(id).map(Portal::label)
}
