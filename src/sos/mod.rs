//! Cross-server SOS broadcast and voice-channel lifecycle management.
//!
//! An SOS is a help request launched from one alliance server and broadcast
//! as duplicated message copies to every server in the directory. Each
//! request reserves a voice channel in the host server; members responding
//! to any copy join that channel through a shared invite link.
//!
//! The subsystem tracks one [`request::SosRequest`] per reserved channel in
//! an in-memory [`registry::SosRegistry`]. Join and leave events mutate the
//! roster under a per-request lock and push the re-rendered summary to every
//! broadcast copy. Once the channel empties, a 60-second inactivity timer
//! reclaims the channel and all copies unless someone rejoins first.
//!
//! State is not persisted: a process restart silently drops every open
//! request. The startup sweep in `scheduler::cleanup` reclaims whatever
//! channels and messages such a restart leaves behind.

pub mod allocator;
pub mod lifecycle;
pub mod registry;
pub mod render;
pub mod request;

#[cfg(test)]
mod test;
