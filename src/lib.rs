//! # `rkkit` main library
//!
//! This library manipulates tape images and floppy disk images for the
//! Radio-86RK family of 8-bit computers and their relatives (Partner, Apogey,
//! Mikrosha, Mikro-80, UT-88, Electronika KR-04, Palmira, Eureka, Specialist,
//! Orion, Lvov, PK8000).
//!
//! ## Architecture
//!
//! Disk operations are built around two layers:
//! * `img::ImageFile` owns the raw image bytes and knows how to load and
//!   persist them, it does not try to interpret anything
//! * `fs::rkdos::Disk` imposes the RKDOS file system on the decoded tracks
//!
//! When a `Disk` is created it takes ownership of some `ImageFile` and uses
//! it as storage.  Any changes are not permanent until the image is saved to
//! whatever file system is hosting rkkit.
//!
//! ## Disk Images
//!
//! The disk side understands the raw 500,000 byte RKDOS floppy layout:
//! 160 tracks of 3,125 bytes, five soft-sectored 512 byte sectors per track
//! located by scanning for address marks.  The file system on top of it is a
//! VTOC allocation bitmap plus a chained directory of 21 byte entries, each
//! pointing at a chain of track/sector list sectors.
//!
//! ## Tape Images
//!
//! The tape side wraps a raw memory image in one of ten cassette framing
//! variants (RK and friends, RKS, RKO, BRU, CAS, LVT), each with its own
//! header, footer, and checksum algorithm.  See the `tape` module.

pub mod img;
pub mod fs;
pub mod tape;
pub mod commands;

type DYNERR = Box<dyn std::error::Error>;
type STDRESULT = Result<(),Box<dyn std::error::Error>>;
