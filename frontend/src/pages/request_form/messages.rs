use common::model::zonal::Zonal;

pub enum Msg {
    SetProtocol(String),
    SetSei(String),
    SetContract(String),
    SetDescription(String),
    SetZonal(Zonal),
    SetTechnician(String),
    SetVisitDate(String),
    CaptureLocation,
    LocationCaptured { latitude: f64, longitude: f64 },
    LocationFailed,
    PhotoSelected(web_sys::File),
    PhotoLoaded(String),
    Submit,
    Saved,
    SaveFailed,
}
